pub(crate) mod bilinear;
