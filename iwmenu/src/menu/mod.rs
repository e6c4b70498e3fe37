//! Interactive front-end pieces: the picker, the secret prompt, the menus
//! built on them and desktop notifications.

pub(crate) mod notify;
pub(crate) mod picker;
pub(crate) mod prompt;
pub(crate) mod selection;
