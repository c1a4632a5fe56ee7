pub mod airport;
pub mod card;
pub mod chart;
pub mod country;
pub mod history;
pub mod settings;
pub mod watch;
