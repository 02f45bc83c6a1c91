pub(crate) mod calculator;
pub(crate) mod captions;
pub(crate) mod config;
pub(crate) mod notify;
pub(crate) mod plan;
pub(crate) mod slots;
