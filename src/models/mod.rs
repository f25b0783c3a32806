//! Timetabling domain models.
//!
//! Input entities ([`Class`], [`Teacher`], [`Room`], [`Course`]) are
//! immutable per request. The [`Schedule`] of [`AssignmentSlot`]s is the
//! mutable solution the optimizer evolves.
//!
//! | Model | Meaning |
//! |-------|---------|
//! | Class | Student group with a list of required subjects |
//! | Teacher | Qualified subjects plus day × period availability |
//! | Room | Physical space (capacity and features advisory) |
//! | Course | Subject → required sessions per week |
//! | Calendar | Working days × periods per day |

mod calendar;
mod entity;
mod schedule;

pub use calendar::Calendar;
pub use entity::{Class, Course, Room, Teacher};
pub use schedule::{AssignmentSlot, Schedule};
