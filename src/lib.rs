//! This crate is the client side of a task and calendar dashboard.
//!
//! It talks to the dashboard server through the [`Client`](client::Client) (or any other [`TaskBackend`](traits::TaskBackend),
//! such as the in-memory [`MockBackend`](mock_backend::MockBackend)), and turns the fetched data into view models
//! that a UI only has to draw:
//! * a sortable, paginated task list, managed by a [`TaskListManager`](task_list::TaskListManager)
//! * a month calendar, managed by a [`CalendarManager`](calendar::CalendarManager)
//!
//! User-facing feedback goes through a [`Notifier`](traits::Notifier).

pub mod traits;
pub mod error;
pub use error::{Error, Result};

mod item;
pub use item::{Item, ItemDetail};
pub mod task;
pub use task::Task;
pub mod event;
pub use event::Event;
pub mod user;
pub use user::User;

pub mod filter;
pub mod sort;
pub mod pagination;
pub mod notification;
pub mod progress;

pub mod task_list;
pub use task_list::TaskListManager;
pub mod calendar;
pub use calendar::CalendarManager;

pub mod client;
pub mod resource;
pub mod mock_backend;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
