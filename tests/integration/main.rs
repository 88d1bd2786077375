//! Integration tests exercising the public simulation API.

mod agent_behaviour;
mod ballistics;
