pub mod dialogs;
pub mod loading;
pub mod result;
pub mod startup;
pub mod upload;
