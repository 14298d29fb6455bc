pub(crate) mod composite;
pub(crate) mod encode;
pub(crate) mod label;
pub(crate) mod wallpaper;
