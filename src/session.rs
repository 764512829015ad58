pub(crate) mod editor;
pub(crate) mod gif_session;
