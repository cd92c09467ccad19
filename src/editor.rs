pub(crate) mod authoring;
pub(crate) mod history;
pub(crate) mod notice;
pub(crate) mod persist;
pub(crate) mod selection;
pub(crate) mod session;
