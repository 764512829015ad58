pub(crate) mod text_layer;
