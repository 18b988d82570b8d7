//! Domain models with validation at construction
//!
//! Request bodies deserialize into `*Input` types; `validate()` turns them
//! into the checked values the repositories accept.

pub mod item;
pub mod list;
pub mod title;
pub mod user;
pub mod validation;

pub use item::{CreateItemInput, ItemPatch, NewItem, TodoItem, UpdateItemInput};
pub use list::{CreateListInput, ListPatch, NewList, TodoList, UpdateListInput};
pub use title::Title;
pub use user::{NewUser, SignInInput, SignUpInput, User, Username};
pub use validation::ValidationError;
