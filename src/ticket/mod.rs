//! Backlog tickets and the demo backlog.
//!
//! Tickets are read-only inputs to planning and refinement. The backlog file
//! is JSON with camelCase fields:
//!
//! ```json
//! {"tickets": [{"id": "ALN-1", "title": "...", "description": "...",
//!   "priority": "high", "storyPoints": 3, "labels": ["bug"]}],
//!  "demoStrategies": [{"id": "demo-x", "name": "...", "description": "..."}]}
//! ```

mod backlog;
mod model;


pub use backlog::{Backlog, BacklogError, DemoStrategy};
pub use model::{Priority, Ticket, DEFAULT_BUSINESS_IMPACT};
