pub(crate) mod curve;
pub(crate) mod projector;
pub(crate) mod surface;
