pub mod preview;
pub mod views;

pub use preview::landing_snapshots;
pub use views::{
    render, render_confirmation_page, render_landing_page, ConfirmationView, FormView,
    LandingView, View,
};
