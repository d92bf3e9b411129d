use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::api::fleet_dto::OrderDto;
use crate::domain::rules::financial::OrderFinancials;
use crate::domain::simulation::delivery_record::DeliveryRecord;
use crate::domain::utils::id::{DriverId, OrderId, RouteId};
use crate::error::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderStatus {
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Cancelled,
}

impl FromStr for OrderStatus {
    type Err = ConversionError;

    /// Accepts both `InTransit` and the collaborator's `IN_TRANSIT` spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.chars().filter(|c| *c != '_' && !c.is_whitespace()).collect::<String>().to_ascii_lowercase();

        match normalized.as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "assigned" => Ok(OrderStatus::Assigned),
            "intransit" => Ok(OrderStatus::InTransit),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(ConversionError::UnknownOrderStatus(s.to_string())),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Assigned => "Assigned",
            OrderStatus::InTransit => "InTransit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Storage identity.
    pub id: OrderId,
    /// Business order number (`ORD001`), the allocation sort key.
    pub order_code: String,
    pub value_rs: Decimal,
    pub assigned_route_id: RouteId,
    pub assigned_driver_id: Option<DriverId>,
    pub status: OrderStatus,
    pub delivery_timestamp: Option<NaiveDateTime>,
    /// Set together with `Delivered`, never edited afterwards.
    pub financials: Option<OrderFinancials>,
}

impl Order {
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn profit(&self) -> Option<Decimal> {
        self.financials.as_ref().map(|f| f.profit)
    }

    pub fn delivered_on_time(&self) -> Option<bool> {
        self.financials.as_ref().map(|f| f.delivered_on_time)
    }

    /// Writes a run's delivery outcome onto the order.
    pub fn apply_delivery(&mut self, record: &DeliveryRecord) {
        self.assigned_driver_id = Some(record.driver_id.clone());
        self.status = OrderStatus::Delivered;
        self.delivery_timestamp = Some(record.delivered_at);
        self.financials = Some(record.financials.clone());
    }
}

impl TryFrom<OrderDto> for Order {
    type Error = ConversionError;

    fn try_from(dto: OrderDto) -> Result<Self, Self::Error> {
        if dto.value_rs < Decimal::ZERO {
            return Err(ConversionError::InvalidField {
                entity: "Order",
                id: dto.order_id,
                reason: format!("order value cannot be negative ({})", dto.value_rs),
            });
        }
        if dto.assigned_route_id.trim().is_empty() {
            return Err(ConversionError::InvalidField { entity: "Order", id: dto.order_id, reason: "assigned route is required".to_string() });
        }

        let status = OrderStatus::from_str(&dto.status)?;

        let financials = match (dto.delivered_on_time, dto.bonus, dto.penalty, dto.fuel_cost, dto.profit) {
            (Some(delivered_on_time), Some(bonus), Some(penalty), Some(fuel_cost), Some(profit)) => {
                Some(OrderFinancials { delivered_on_time, bonus, penalty, fuel_cost, profit })
            }
            _ => None,
        };

        Ok(Order {
            id: OrderId::new(dto.id),
            order_code: dto.order_id,
            value_rs: dto.value_rs,
            assigned_route_id: RouteId::new(dto.assigned_route_id),
            assigned_driver_id: dto.assigned_driver_id.map(DriverId::new),
            status,
            delivery_timestamp: dto.delivery_timestamp,
            financials,
        })
    }
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        let financials = order.financials.as_ref();
        OrderDto {
            id: order.id.id.clone(),
            order_id: order.order_code.clone(),
            value_rs: order.value_rs,
            assigned_route_id: order.assigned_route_id.id.clone(),
            status: order.status.to_string(),
            assigned_driver_id: order.assigned_driver_id.as_ref().map(|d| d.id.clone()),
            delivery_timestamp: order.delivery_timestamp,
            delivered_on_time: financials.map(|f| f.delivered_on_time),
            bonus: financials.map(|f| f.bonus),
            penalty: financials.map(|f| f.penalty),
            fuel_cost: financials.map(|f| f.fuel_cost),
            profit: financials.map(|f| f.profit),
        }
    }
}
