mod coming_soon;
pub use coming_soon::{Clients, Reports, Settings, Transactions};

mod dashboard;
pub use dashboard::Dashboard;
