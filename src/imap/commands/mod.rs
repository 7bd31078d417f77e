mod close;
mod expunge;
mod login;
mod logout;
mod search;
mod select;
mod store;

pub use close::close;
pub use expunge::ExpungeError;
pub use expunge::expunge;
pub use login::LoginError;
pub use login::login;
pub use logout::logout;
pub use search::SearchError;
pub use search::search;
pub use select::SelectError;
pub use select::select;
pub use store::store_deleted;
