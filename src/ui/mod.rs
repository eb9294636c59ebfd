pub(crate) mod notifications;
pub(crate) mod render;
pub(crate) mod terminal;
pub(crate) mod view;

pub(crate) use view::ViewContext;
