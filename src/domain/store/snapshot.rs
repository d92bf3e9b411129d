use crate::api::fleet_dto::FleetDto;
use crate::domain::fleet::driver::Driver;
use crate::domain::fleet::order::Order;
use crate::domain::fleet::route::Route;
use crate::error::ConversionError;

/// Private copy of the fleet a run works on.
///
/// Routes are kept whether active or not so orders on retired routes can be
/// told apart from orders on unknown routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetSnapshot {
    pub drivers: Vec<Driver>,
    pub routes: Vec<Route>,
    pub orders: Vec<Order>,
}

impl FleetSnapshot {
    pub fn from_dto(dto: FleetDto) -> Result<Self, ConversionError> {
        let drivers = dto.drivers.into_iter().map(Driver::try_from).collect::<Result<Vec<_>, _>>()?;
        let routes = dto.routes.into_iter().map(Route::try_from).collect::<Result<Vec<_>, _>>()?;
        let orders = dto.orders.into_iter().map(Order::try_from).collect::<Result<Vec<_>, _>>()?;

        Ok(FleetSnapshot { drivers, routes, orders })
    }

    pub fn active_driver_count(&self) -> usize {
        self.drivers.iter().filter(|d| d.active).count()
    }

    pub fn pending_order_count(&self) -> usize {
        self.orders.iter().filter(|o| o.is_pending()).count()
    }
}
