pub mod chart_service;
pub mod insights_service;
pub mod ledger_service;
pub mod metrics_service;
