//! Turning a [`Scenario`] into exactly one physics cast and a [`Presentation`] of its result.

use euclid::vec3;

use crate::math::{FreeCoordinate, FreePoint, FreeVector};
use crate::physics::{CastRequest, CastVolume, PhysicsQueries};
use crate::present::{Marker, Presentation};
use crate::query::QueryResult;
use crate::scenario::{CastMode, CastShape, ProxyId, Scenario, ScenarioKind};
use crate::settings::{LINE_WIDTH, Settings};
use crate::stage::{CapsulePart, ProxyObject, ProxyPart, Stage};

/// Error from [`dispatch()`]: the scenario and the stage do not fit together.
///
/// These are authoring mistakes; nothing is cast when one occurs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum DispatchError {
    /// {kind} scenario has no proxy object
    MissingProxy {
        /// Kind of the offending scenario.
        kind: ScenarioKind,
    },
    /// proxy object {0:?} does not exist
    UnknownProxy(ProxyId),
    /// capsule proxy object {proxy:?} has no {part:?} part
    MissingProxyPart {
        /// The proxy object.
        proxy: ProxyId,
        /// The part it lacks.
        part: CapsulePart,
    },
}

impl core::error::Error for DispatchError {}

/// Prepares the stage for `scenario`, performs its cast, and returns a [`Presentation`]
/// of the result, ready to be stepped.
///
/// Exactly one call is made to `physics`, unless an error is returned, in which case
/// none is.
///
/// Rays are shown with the stage's line display, and hide the scenario's proxy object if
/// it has one. Swept shapes clear the line display and show the proxy object at the cast
/// origin, sized to match the cast.
pub fn dispatch<P, S>(
    scenario: &Scenario,
    physics: &P,
    stage: &mut S,
    settings: &Settings,
) -> Result<Presentation, DispatchError>
where
    P: PhysicsQueries + ?Sized,
    S: Stage + ?Sized,
{
    let origin = scenario.origin.position;
    let direction = scenario.origin.forward();
    let kind = scenario.kind();

    let (volume, marker) = match scenario.shape {
        CastShape::Ray => {
            let line = stage.line_mut();
            line.set_endpoint_count(2);
            line.set_width(LINE_WIDTH);
            line.set_position(0, origin);
            line.set_position(1, origin);
            if let Some(proxy) = scenario.proxy.and_then(|id| stage.proxy_mut(id)) {
                proxy.visible = false;
            }
            (CastVolume::Ray, Marker::Line)
        }
        CastShape::Sphere { radius } => {
            let (id, proxy) = swept_proxy(scenario, stage)?;
            proxy.scale = uniform(radius * 2.0);
            show_at(proxy, origin);
            (CastVolume::Sphere { radius }, Marker::Proxy(id))
        }
        CastShape::Box { half_extents } => {
            let (id, proxy) = swept_proxy(scenario, stage)?;
            proxy.scale = half_extents * 2.0;
            show_at(proxy, origin);
            let volume = CastVolume::Box {
                half_extents,
                orientation: scenario.origin.rotation,
            };
            (volume, Marker::Proxy(id))
        }
        CastShape::Capsule { radius, height } => {
            let (id, proxy) = swept_proxy(scenario, stage)?;
            let offset = proxy.up() * (height / 2.0);
            let parts = [
                (CapsulePart::TopCap, offset, uniform(radius * 2.0)),
                (CapsulePart::BottomCap, -offset, uniform(radius * 2.0)),
                (
                    CapsulePart::Body,
                    FreeVector::zero(),
                    vec3(radius * 2.0, height, radius * 2.0),
                ),
            ];
            // check every part before touching any
            for (part, _, _) in parts {
                if proxy.part(part).is_none() {
                    return Err(DispatchError::MissingProxyPart { proxy: id, part });
                }
            }
            for (part, offset, scale) in parts {
                proxy.insert_part(part, ProxyPart { offset, scale });
            }
            show_at(proxy, origin);
            let volume = CastVolume::Capsule {
                point1: origin + offset,
                point2: origin - offset,
                radius,
            };
            (volume, Marker::Proxy(id))
        }
    };

    let request = CastRequest {
        origin,
        direction,
        max_distance: scenario.length,
        layers: scenario.layers,
        triggers: scenario.triggers,
    };
    let result = match scenario.mode {
        CastMode::Nearest => QueryResult::from_nearest(physics.cast_nearest(&volume, &request)),
        CastMode::All => QueryResult::from_hits(physics.cast_all(&volume, &request)),
    };
    log::debug!(
        "{kind} from {origin:?} along {direction:?} hit {count} target(s)",
        count = result.hits().len()
    );

    Ok(Presentation::start(
        origin, direction, marker, result, settings,
    ))
}

/// Clears the line display and finds the proxy object of a swept-shape scenario.
fn swept_proxy<'s, S: Stage + ?Sized>(
    scenario: &Scenario,
    stage: &'s mut S,
) -> Result<(ProxyId, &'s mut ProxyObject), DispatchError> {
    let id = scenario.proxy.ok_or(DispatchError::MissingProxy {
        kind: scenario.kind(),
    })?;
    let line = stage.line_mut();
    line.clear();
    line.set_width(LINE_WIDTH);
    let proxy = stage
        .proxy_mut(id)
        .ok_or(DispatchError::UnknownProxy(id))?;
    Ok((id, proxy))
}

fn show_at(proxy: &mut ProxyObject, origin: FreePoint) {
    proxy.visible = true;
    proxy.position = origin;
}

fn uniform(size: FreeCoordinate) -> FreeVector {
    vec3(size, size, size)
}
