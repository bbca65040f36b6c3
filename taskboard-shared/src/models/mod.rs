/// Domain models for Taskboard
///
/// Each model owns its store operations, all of which take a
/// `&dyn DocumentStore` so any backend can be plugged in.
///
/// # Models
///
/// - `user`: Accounts, roles and group membership
/// - `task`: Personal tasks
/// - `assigned_task`: Tasks assigned within a group
/// - `group`: Groups

pub mod assigned_task;
pub mod group;
pub mod task;
pub mod user;
