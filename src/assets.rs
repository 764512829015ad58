pub(crate) mod data_url;
pub(crate) mod decode;
pub(crate) mod load;
pub(crate) mod resolve;
