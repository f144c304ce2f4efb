//! Load balancer API abstraction for lb-console
//!
//! Defines the collaborator contract the panel talks through:
//! - Wire records (load balancer, listener, pool, member, health monitor)
//! - Selectable option records, shape-validated at this boundary
//! - The [`LoadBalancerApi`] trait and its REST implementation
//!
//! Consumers never see transport-level details; every failure surfaces as an
//! [`ApiError`] carrying a human-readable message.

pub mod error;
pub mod http;
pub mod rest;
pub mod traits;
pub mod types;

// Re-export common types
pub use error::{ApiError, ApiResult};
pub use rest::RestLoadBalancerApi;
pub use traits::LoadBalancerApi;
pub use types::{
    ApiContext, FloatingIpPoolOption, HealthMonitor, InsertHeaders, InstanceOption, Listener,
    ListenerPayload, ListenerProtocol, LoadBalancer, LoadBalancerPayload, Member, MemberKind,
    MemberPayload, MemberRole, MonitorPayload, MonitorType, OptionSets, Pool, PoolAlgorithm,
    PoolPayload, ProjectOption, SessionPersistence, SessionPersistenceKind, SubnetOption,
};
