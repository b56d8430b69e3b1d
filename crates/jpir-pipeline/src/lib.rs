#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/jpir/jpir/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Batch driver for the company data pipeline.
//!
//! The [`Harvester`] holds the configured providers and the artifact store
//! and runs the per-company flow: fetch raw payloads, derive the output
//! document through `jpir-metrics`, persist it. Derivation is pure and
//! per-company independent, so companies are processed through a bounded
//! `buffer_unordered` worker pool without any cross-company coordination.
//!
//! Failure policy: a provider answering "no data" leaves the affected
//! sub-document absent; a transport or parse failure fails that company
//! alone, which still produces a `success=false` document so downstream
//! consumers can tell "no data yet" from "fetch error".

mod harvest;

pub use harvest::{CompanyOutcome, Harvester, RunSummary};
