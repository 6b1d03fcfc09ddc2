//! Scripted AR session: two configured markers, a handful of change batches,
//! and a console scene runtime that prints every call the binder issues.

use log::{info, LevelFilter};
use nalgebra::UnitQuaternion;

use marker_binder::{
    BinderConfig, MarkerBinder, Pose, ProxyTemplate, SceneRuntime, SubscribeError, Subscription,
    TrackingChanges, TrackingListener, TrackingReport, TrackingSource, TrackingState,
};
use marker_binder_core::init_with_level;

/// Scene runtime that just logs activation and transform calls.
#[derive(Default)]
struct ConsoleScene {
    names: Vec<String>,
}

impl SceneRuntime for ConsoleScene {
    type Handle = usize;

    fn instantiate(&mut self, template: &ProxyTemplate) -> usize {
        info!(
            "instantiate '{}' ({})",
            template.name,
            template.asset.as_deref().unwrap_or("no asset")
        );
        self.names.push(template.name.clone());
        self.names.len() - 1
    }

    fn set_active(&mut self, handle: &usize, active: bool) {
        info!("set_active '{}' -> {active}", self.names[*handle]);
    }

    fn set_transform(&mut self, handle: &usize, pose: &Pose) {
        info!(
            "set_transform '{}' -> ({:.2}, {:.2}, {:.2})",
            self.names[*handle], pose.position.x, pose.position.y, pose.position.z
        );
    }
}

#[derive(Default)]
struct ScriptedSource {
    active: Option<Subscription>,
}

impl TrackingSource for ScriptedSource {
    fn subscribe(&mut self) -> Result<Subscription, SubscribeError> {
        if self.active.is_some() {
            return Err(SubscribeError::AlreadySubscribed);
        }
        let subscription = Subscription::new(0);
        self.active = Some(subscription);
        Ok(subscription)
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        if self.active == Some(subscription) {
            self.active = None;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Debug)?;

    let config = BinderConfig::new(vec![
        ProxyTemplate::with_asset("poster", "models/poster.glb"),
        ProxyTemplate::with_asset("badge", "models/badge.glb"),
    ]);

    let mut source = ScriptedSource::default();
    let mut binder = MarkerBinder::bind(config, ConsoleScene::default(), &mut source)?;

    let batches = [
        // Poster enters the frame fully tracked.
        TrackingChanges {
            added: vec![TrackingReport::new(
                "poster",
                TrackingState::Tracked,
                Pose::from_xyz(0.1, 0.0, -0.5),
            )],
            ..TrackingChanges::default()
        },
        // Poster moves and rotates; badge shows up low-confidence.
        TrackingChanges {
            updated: vec![
                TrackingReport::new(
                    "poster",
                    TrackingState::Tracked,
                    Pose::new(
                        nalgebra::Point3::new(0.15, 0.02, -0.48),
                        UnitQuaternion::from_euler_angles(0.0, 0.3, 0.0),
                    ),
                ),
                TrackingReport::new(
                    "badge",
                    TrackingState::Limited,
                    Pose::from_xyz(-0.2, 0.0, -0.6),
                ),
            ],
            ..TrackingChanges::default()
        },
        // Poster leaves the frame; the host hands over its last report.
        TrackingChanges {
            removed: vec![(
                "poster".to_string(),
                Some(TrackingReport::new(
                    "poster",
                    TrackingState::None,
                    Pose::from_xyz(0.15, 0.02, -0.48),
                )),
            )],
            ..TrackingChanges::default()
        },
    ];

    for (frame, batch) in batches.iter().enumerate() {
        info!("-- frame {frame} --");
        binder.on_changes(batch);
    }

    binder.detach(&mut source);
    info!("session finished");
    Ok(())
}
