pub mod chart;
pub mod insight;
pub mod ledger;
pub mod settings;
pub mod snapshot;
pub mod transaction;
