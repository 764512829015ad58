pub(crate) mod fit;
pub(crate) mod multi;
pub(crate) mod single;
