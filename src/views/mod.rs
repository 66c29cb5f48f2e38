pub mod chat;
pub mod compare;
pub mod gallery;
pub mod shared;
pub mod stage;
pub mod style_picker;
pub mod upload;

pub use chat::ChatPanel;
pub use compare::CompareView;
pub use gallery::Gallery;
pub use shared::ErrorBanner;
pub use stage::Stage;
pub use style_picker::StylePicker;
pub use upload::UploadPanel;
