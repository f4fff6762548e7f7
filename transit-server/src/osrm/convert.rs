//! Conversion from OSRM wire types to decoded routes.

use crate::domain::Coordinate;

use super::error::OsrmError;
use super::polyline;
use super::types::{ApiLeg, ApiRoute, ApiStep, MultiRoute, OsrmRoute, RouteLeg, RouteResponse};

/// Human-readable text for a step.
///
/// Prefers the explicit instruction, then the road name, then a
/// synthesized `"{type} {modifier}"`.
pub fn step_instruction(step: &ApiStep) -> String {
    if let Some(instruction) = step.maneuver.instruction.as_deref()
        && !instruction.is_empty()
    {
        return instruction.to_string();
    }
    if !step.name.is_empty() {
        return step.name.clone();
    }
    match step.maneuver.modifier.as_deref() {
        Some(modifier) => format!("{} {}", step.maneuver.kind, modifier),
        None => step.maneuver.kind.clone(),
    }
}

fn leg_instructions(leg: &ApiLeg) -> Vec<String> {
    leg.steps.iter().map(step_instruction).collect()
}

/// Concatenate the step geometries of a leg.
fn leg_geometry(leg: &ApiLeg) -> Result<Vec<Coordinate>, OsrmError> {
    let mut geometry: Vec<Coordinate> = Vec::new();
    for step in &leg.steps {
        let Some(encoded) = step.geometry.as_deref() else {
            continue;
        };
        let points = polyline::decode(encoded)?;
        let skip = usize::from(geometry.last().is_some() && geometry.last() == points.first());
        geometry.extend(points.into_iter().skip(skip));
    }
    Ok(geometry)
}

/// The first route of a successful response.
fn first_route(response: &RouteResponse) -> Result<&ApiRoute, OsrmError> {
    if response.code != "Ok" {
        return Err(OsrmError::NoRoute {
            code: response.code.clone(),
        });
    }
    response.routes.first().ok_or_else(|| OsrmError::NoRoute {
        code: "NoRoute".to_string(),
    })
}

/// Decode a point-to-point response.
///
/// Instructions come from the first leg only.
pub fn convert_route(response: &RouteResponse) -> Result<OsrmRoute, OsrmError> {
    let route = first_route(response)?;
    let geometry = polyline::decode(&route.geometry)?;
    let instructions = route.legs.first().map(leg_instructions).unwrap_or_default();

    Ok(OsrmRoute {
        geometry,
        duration_seconds: route.duration,
        distance_meters: route.distance,
        instructions,
    })
}

/// Decode a multi-waypoint response into per-leg routes.
pub fn convert_multi_route(response: &RouteResponse) -> Result<MultiRoute, OsrmError> {
    let route = first_route(response)?;
    let geometry = polyline::decode(&route.geometry)?;

    let legs = route
        .legs
        .iter()
        .map(|leg| {
            Ok(RouteLeg {
                geometry: leg_geometry(leg)?,
                duration_seconds: leg.duration,
                distance_meters: leg.distance,
                instructions: leg_instructions(leg),
            })
        })
        .collect::<Result<Vec<_>, OsrmError>>()?;

    Ok(MultiRoute {
        legs,
        geometry,
        duration_seconds: route.duration,
        distance_meters: route.distance,
    })
}
