//! Seams between the engine's components: the tenant store contract, the
//! remote gateway contract, and cooperative cancellation.

mod cancellation;
mod gateway;
mod storage;

pub use cancellation::{Cancellable, CancellationToken};
pub use gateway::{ChangeCallback, IRemoteGateway, RowPayload, SubscriptionHandle, UpsertAck};
pub use storage::{Collection, ITenantStorage};
