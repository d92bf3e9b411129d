use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::api::fleet_dto::RouteDto;
use crate::domain::utils::id::RouteId;
use crate::error::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

impl FromStr for TrafficLevel {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" | "LOW" | "low" => Ok(TrafficLevel::Low),
            "Medium" | "MEDIUM" | "medium" => Ok(TrafficLevel::Medium),
            "High" | "HIGH" | "high" => Ok(TrafficLevel::High),
            _ => Err(ConversionError::UnknownTrafficLevel(s.to_string())),
        }
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrafficLevel::Low => "Low",
            TrafficLevel::Medium => "Medium",
            TrafficLevel::High => "High",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Storage identity assigned by the route catalog.
    pub id: String,
    pub route_id: RouteId,
    pub distance_km: Decimal,
    pub traffic_level: TrafficLevel,
    /// Nominal delivery duration without fatigue.
    pub base_time_minutes: i64,
    pub active: bool,
}

impl TryFrom<RouteDto> for Route {
    type Error = ConversionError;

    fn try_from(dto: RouteDto) -> Result<Self, Self::Error> {
        let traffic_level = TrafficLevel::from_str(&dto.traffic_level)?;

        if dto.distance_km <= Decimal::ZERO {
            return Err(ConversionError::InvalidField {
                entity: "Route",
                id: dto.route_id,
                reason: format!("distance must be positive ({} km)", dto.distance_km),
            });
        }
        if dto.base_time_minutes <= 0 {
            return Err(ConversionError::InvalidField {
                entity: "Route",
                id: dto.route_id,
                reason: format!("base time must be positive ({} min)", dto.base_time_minutes),
            });
        }

        Ok(Route {
            id: dto.id,
            route_id: RouteId::new(dto.route_id),
            distance_km: dto.distance_km,
            traffic_level,
            base_time_minutes: dto.base_time_minutes,
            active: dto.active,
        })
    }
}

impl From<&Route> for RouteDto {
    fn from(route: &Route) -> Self {
        RouteDto {
            id: route.id.clone(),
            route_id: route.route_id.id.clone(),
            distance_km: route.distance_km,
            traffic_level: route.traffic_level.to_string(),
            base_time_minutes: route.base_time_minutes,
            active: route.active,
        }
    }
}
