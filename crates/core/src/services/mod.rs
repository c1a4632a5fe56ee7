pub mod airport_service;
pub mod card_service;
pub mod chart_service;
pub mod fare_service;
pub mod history_service;
pub mod watch_service;
pub mod wishlist_service;
