// src/core/mod.rs

// Root of the `core` module. Everything below here is UI-agnostic: the
// engine produces a `RiskReport` and the binary decides how to show it.

/// The risk scoring engine: one submodule per check, plus the aggregator
/// that validates input, fans out the checks, and composes the report.
pub mod engine;

/// A static catalog of explanations and advice for every warning and
/// danger finding the engine can emit.
pub mod knowledge_base;

/// Data structures shared across the application, such as `RiskReport`,
/// `Finding`, `Severity`, and the error type.
pub mod models;
