mod input;
mod nav;
mod on_command_async;
mod on_debounce;

pub use input::InputController;
pub use nav::NavController;
pub use on_command_async::OnCommandAsync;
pub use on_debounce::OnDebounce;
