mod notifications;
pub use notifications::NotificationCard;

mod profile_page;
pub use profile_page::ProfileView;
