//! Assignable focal-plane targets. A target is immobile at the model
//! level: only its binding to a robot, and the set of robots that could
//! validly reach it, mutate after construction.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiberType {
    Apogee,
    Boss,
    Metrology,
}

#[derive(Debug, Clone)]
pub struct Target {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub fiber_type: FiberType,
    pub priority: i32,
    pub assigned_robot_id: Option<i64>,
    pub valid_robot_ids: Vec<i64>,
}

impl Target {
    #[must_use]
    pub fn new(id: i64, x: f64, y: f64, fiber_type: FiberType, priority: i32) -> Self {
        Self {
            id,
            x,
            y,
            fiber_type,
            priority,
            assigned_robot_id: None,
            valid_robot_ids: Vec::new(),
        }
    }
}
