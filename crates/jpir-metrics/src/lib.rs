#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/jpir/jpir/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial metrics derivation engine.
//!
//! Every function in this crate is a pure transform over immutable inputs:
//! given identical raw payloads the output documents are identical, no
//! shared state is touched, and nothing here performs I/O or reads the
//! clock. Companies can therefore be processed in any order and with any
//! degree of parallelism by the surrounding pipeline.
//!
//! Missing or malformed provider data degrades to absent fields — the engine
//! never fails a company.

/// Record assembler composing the component outputs.
pub mod assemble;
/// Analyst consensus aggregator.
pub mod consensus;
/// Dividend aggregator.
pub mod dividends;
/// Time-series normalizer.
pub mod normalize;
/// Ratio calculator.
pub mod ratios;
/// Statement aligner.
pub mod statements;
/// Moving-average classifier.
pub mod trend;

mod util;

pub use assemble::{ConsensusPayloads, MetricsPayloads, assemble_consensus, assemble_metrics};
pub use consensus::{PAST_EARNINGS, partition_earnings, summarize_recommendations, summarize_targets};
pub use dividends::aggregate;
pub use normalize::normalize;
pub use ratios::derive;
pub use statements::{MAX_YEARS, align};
pub use trend::{DEVIATION_THRESHOLD, classify};
