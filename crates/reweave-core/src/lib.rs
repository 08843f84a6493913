//! Core IR and transform passes for the reweave staged lowering pipeline.
//!
//! Lowering proceeds stage by stage; each stage rewrites the ops it knows
//! about and bridges representation mismatches with placeholder cast ops.
//! This crate holds the shared dataflow IR ([`ir`]), the pass machinery
//! ([`pipeline`]), and the transforms that clean up after staging
//! ([`transforms`]) — most importantly cast reconciliation, which collapses
//! placeholder cast chains whose composite effect is the identity.

pub mod entity;
pub mod error;
pub mod ir;
pub mod pipeline;
pub mod transforms;
