pub(crate) mod date;
pub(crate) mod metrics;
pub(crate) mod resolve;
