mod assignment;
mod context;
mod discrepancy;
mod hierarchy;
mod id_grammar;
mod matcher;
mod options;
mod pipeline;
mod run;

pub use pipeline::{ReconciliationOutcome, reconcile};
pub use run::run;
