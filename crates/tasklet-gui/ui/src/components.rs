mod filter_tabs;
mod page_selectors;
mod task_form;
mod task_list;
mod task_list_row;

pub use filter_tabs::FilterTabs;
pub use page_selectors::PageSelectors;
pub use task_form::TaskForm;
pub use task_list::TaskList;
use task_list_row::TaskListRow;
