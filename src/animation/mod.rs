pub(crate) mod curve;
