mod diary_entry;
mod entry_type;
mod goals;
mod number;
mod recipe;

pub use diary_entry::{new_entry_id, DiaryEntry};
pub use entry_type::EntryType;
pub use goals::DiaryGoals;
pub use recipe::{parse_lines, Recipe};
