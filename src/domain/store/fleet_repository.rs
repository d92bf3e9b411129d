use crate::domain::simulation::delivery_record::DeliveryRecord;
use crate::domain::store::snapshot::FleetSnapshot;
use crate::error::Result;

/// Narrow access to the externally owned driver/route/order data.
pub trait FleetRepository: Send + Sync {
    /// Active drivers, all routes and pending orders as of now.
    fn snapshot(&self) -> Result<FleetSnapshot>;

    /// Runs `work` on a snapshot as one serializable unit.
    ///
    /// No other run may read or write the fleet until `work` returns. The
    /// delivery records it hands back are applied in one batch; on error nothing
    /// is written.
    fn run_exclusive<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&FleetSnapshot) -> Result<(T, Vec<DeliveryRecord>)>;
}
