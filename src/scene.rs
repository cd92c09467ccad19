pub(crate) mod defense;
pub(crate) mod model;
pub(crate) mod template;
