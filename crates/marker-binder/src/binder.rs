use std::collections::HashMap;

use log::{debug, warn};

use marker_binder_core::{
    SceneRuntime, SubscribeError, Subscription, TrackingChanges, TrackingListener, TrackingReport,
    TrackingSource,
};

use crate::config::{BinderConfig, ConfigError};
use crate::policy::{sync_action, SyncAction};

/// Errors raised over the binder's lifecycle.
#[derive(thiserror::Error, Debug)]
pub enum BinderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("tracking runtime unavailable: {0}")]
    TrackingUnavailable(#[from] SubscribeError),
}

/// Binds tracked markers to pre-instantiated scene proxies.
///
/// Construction instantiates one hidden proxy per configured template, keyed
/// by template name. The registry is fixed afterwards: entries are only shown,
/// hidden, and moved, never added or removed. Reports for identities outside
/// the registry are logged and skipped without disturbing the rest of the
/// batch.
pub struct MarkerBinder<S: SceneRuntime> {
    scene: S,
    registry: HashMap<String, S::Handle>,
    subscription: Option<Subscription>,
}

impl<S: SceneRuntime> std::fmt::Debug for MarkerBinder<S>
where
    S: std::fmt::Debug,
    S::Handle: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerBinder")
            .field("scene", &self.scene)
            .field("registry", &self.registry)
            .field("subscription", &self.subscription)
            .finish()
    }
}

impl<S: SceneRuntime> MarkerBinder<S> {
    /// Instantiate one hidden proxy per template at the identity pose.
    ///
    /// An empty template list yields an empty, valid registry.
    pub fn new(config: BinderConfig, mut scene: S) -> Result<Self, BinderError> {
        config.validate()?;

        let mut registry = HashMap::with_capacity(config.templates.len());
        for template in &config.templates {
            let handle = scene.instantiate(template);
            scene.set_active(&handle, false);
            registry.insert(template.name.clone(), handle);
        }
        debug!("instantiated {} hidden marker proxies", registry.len());

        Ok(Self {
            scene,
            registry,
            subscription: None,
        })
    }

    /// Construct the binder and subscribe it to `source` in one step.
    pub fn bind(
        config: BinderConfig,
        scene: S,
        source: &mut dyn TrackingSource,
    ) -> Result<Self, BinderError> {
        let mut binder = Self::new(config, scene)?;
        binder.attach(source)?;
        Ok(binder)
    }

    /// Register for change notifications on `source`.
    ///
    /// An unavailable tracking runtime is reported explicitly rather than
    /// leaving the binder silently inert; the binder stays detached and
    /// ignores any notifications delivered anyway.
    pub fn attach(&mut self, source: &mut dyn TrackingSource) -> Result<(), BinderError> {
        if self.subscription.is_some() {
            return Ok(());
        }
        match source.subscribe() {
            Ok(subscription) => {
                self.subscription = Some(subscription);
                Ok(())
            }
            Err(err) => {
                warn!("could not subscribe to tracking changes: {err}");
                Err(BinderError::TrackingUnavailable(err))
            }
        }
    }

    /// Drop the change-notification subscription.
    ///
    /// Safe to call when never attached or already detached.
    pub fn detach(&mut self, source: &mut dyn TrackingSource) {
        if let Some(subscription) = self.subscription.take() {
            source.unsubscribe(subscription);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn proxy_count(&self) -> usize {
        self.registry.len()
    }

    pub fn has_proxy(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// The scene runtime the binder drives.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Consume the binder and hand the scene runtime back.
    pub fn into_scene(self) -> S {
        self.scene
    }

    fn sync(&mut self, report: &TrackingReport) {
        let Some(handle) = self.registry.get(&report.id) else {
            warn!("no proxy registered for marker '{}'; skipping report", report.id);
            return;
        };
        match sync_action(report) {
            SyncAction::Hide => self.scene.set_active(handle, false),
            SyncAction::Show(pose) => {
                self.scene.set_active(handle, true);
                self.scene.set_transform(handle, &pose);
            }
        }
    }
}

impl<S: SceneRuntime> TrackingListener for MarkerBinder<S> {
    /// Apply the sync policy to every entry in delivery order: added, then
    /// updated, then removed. Removed entries are evaluated against their
    /// last-known report; an absent report is a no-op. Each entry yields
    /// exactly one sync application.
    fn on_changes(&mut self, changes: &TrackingChanges) {
        if self.subscription.is_none() {
            return;
        }
        for report in &changes.added {
            self.sync(report);
        }
        for report in &changes.updated {
            self.sync(report);
        }
        for (_, last_known) in &changes.removed {
            if let Some(report) = last_known {
                self.sync(report);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker_binder_core::{Pose, ProxyTemplate, TrackingState};
    use nalgebra::UnitQuaternion;

    #[derive(Debug)]
    struct ProxyState {
        name: String,
        active: bool,
        pose: Pose,
    }

    /// Scene fake that records every proxy's current state.
    #[derive(Debug, Default)]
    struct RecordingScene {
        proxies: Vec<ProxyState>,
    }

    impl RecordingScene {
        fn proxy(&self, name: &str) -> &ProxyState {
            self.proxies
                .iter()
                .find(|p| p.name == name)
                .expect("proxy instantiated")
        }
    }

    impl SceneRuntime for RecordingScene {
        type Handle = usize;

        fn instantiate(&mut self, template: &ProxyTemplate) -> usize {
            self.proxies.push(ProxyState {
                name: template.name.clone(),
                active: true,
                pose: Pose::identity(),
            });
            self.proxies.len() - 1
        }

        fn set_active(&mut self, handle: &usize, active: bool) {
            self.proxies[*handle].active = active;
        }

        fn set_transform(&mut self, handle: &usize, pose: &Pose) {
            self.proxies[*handle].pose = *pose;
        }
    }

    /// Tracking-source fake with a single listener slot.
    struct FakeSource {
        available: bool,
        active: Option<Subscription>,
        next_id: u64,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                available: true,
                active: None,
                next_id: 0,
            }
        }

        fn unavailable() -> Self {
            Self {
                available: false,
                active: None,
                next_id: 0,
            }
        }
    }

    impl TrackingSource for FakeSource {
        fn subscribe(&mut self) -> Result<Subscription, SubscribeError> {
            if !self.available {
                return Err(SubscribeError::Unavailable);
            }
            if self.active.is_some() {
                return Err(SubscribeError::AlreadySubscribed);
            }
            let subscription = Subscription::new(self.next_id);
            self.next_id += 1;
            self.active = Some(subscription);
            Ok(subscription)
        }

        fn unsubscribe(&mut self, subscription: Subscription) {
            if self.active == Some(subscription) {
                self.active = None;
            }
        }
    }

    fn two_marker_config() -> BinderConfig {
        BinderConfig::new(vec![
            ProxyTemplate::new("poster"),
            ProxyTemplate::new("badge"),
        ])
    }

    fn tracked(id: &str, pose: Pose) -> TrackingReport {
        TrackingReport::new(id, TrackingState::Tracked, pose)
    }

    fn attached_binder() -> (MarkerBinder<RecordingScene>, FakeSource) {
        let mut source = FakeSource::new();
        let binder =
            MarkerBinder::bind(two_marker_config(), RecordingScene::default(), &mut source)
                .unwrap();
        (binder, source)
    }

    #[test]
    fn startup_instantiates_one_hidden_proxy_per_template() {
        let binder = MarkerBinder::new(two_marker_config(), RecordingScene::default()).unwrap();

        assert_eq!(binder.proxy_count(), 2);
        assert!(binder.has_proxy("poster"));
        assert!(binder.has_proxy("badge"));
        assert!(!binder.has_proxy("mug"));
        for proxy in &binder.scene().proxies {
            assert!(!proxy.active, "proxy '{}' should spawn hidden", proxy.name);
            assert_eq!(proxy.pose, Pose::identity());
        }
    }

    #[test]
    fn empty_config_yields_empty_registry() {
        let binder = MarkerBinder::new(BinderConfig::default(), RecordingScene::default()).unwrap();
        assert_eq!(binder.proxy_count(), 0);
    }

    #[test]
    fn duplicate_template_names_are_rejected() {
        let config = BinderConfig::new(vec![
            ProxyTemplate::new("poster"),
            ProxyTemplate::new("poster"),
        ]);
        let err = MarkerBinder::new(config, RecordingScene::default()).unwrap_err();
        assert!(matches!(
            err,
            BinderError::Config(ConfigError::DuplicateTemplate(name)) if name == "poster"
        ));
    }

    #[test]
    fn tracked_report_shows_proxy_at_reported_pose() {
        let (mut binder, _source) = attached_binder();
        let pose = Pose::new(
            nalgebra::Point3::new(1.0, 0.5, -2.0),
            UnitQuaternion::from_euler_angles(0.0, 0.2, 0.0),
        );

        binder.on_changes(&TrackingChanges {
            added: vec![tracked("poster", pose)],
            ..TrackingChanges::default()
        });

        let proxy = binder.scene().proxy("poster");
        assert!(proxy.active);
        assert_eq!(proxy.pose, pose);
        assert!(!binder.scene().proxy("badge").active);
    }

    #[test]
    fn limited_report_hides_without_touching_pose() {
        let (mut binder, _source) = attached_binder();
        let first = Pose::from_xyz(1.0, 0.0, 0.0);

        binder.on_changes(&TrackingChanges {
            added: vec![tracked("poster", first)],
            ..TrackingChanges::default()
        });
        binder.on_changes(&TrackingChanges {
            updated: vec![TrackingReport::new(
                "poster",
                TrackingState::Limited,
                Pose::from_xyz(2.0, 0.0, 0.0),
            )],
            ..TrackingChanges::default()
        });

        let proxy = binder.scene().proxy("poster");
        assert!(!proxy.active);
        assert_eq!(proxy.pose, first, "limited report must not move the proxy");
    }

    #[test]
    fn repeated_tracked_report_is_idempotent() {
        let (mut binder, _source) = attached_binder();
        let pose = Pose::from_xyz(0.0, 1.0, 0.0);
        let changes = TrackingChanges {
            updated: vec![tracked("badge", pose)],
            ..TrackingChanges::default()
        };

        binder.on_changes(&changes);
        binder.on_changes(&changes);

        let proxy = binder.scene().proxy("badge");
        assert!(proxy.active);
        assert_eq!(proxy.pose, pose);
    }

    #[test]
    fn removed_entry_applies_last_known_state() {
        let (mut binder, _source) = attached_binder();
        let last_pose = Pose::from_xyz(3.0, 0.0, 1.0);

        binder.on_changes(&TrackingChanges {
            removed: vec![("poster".into(), Some(tracked("poster", last_pose)))],
            ..TrackingChanges::default()
        });

        let proxy = binder.scene().proxy("poster");
        assert!(proxy.active, "removal with a tracked last state keeps the proxy shown");
        assert_eq!(proxy.pose, last_pose);
    }

    #[test]
    fn removed_entry_without_report_is_a_noop() {
        let (mut binder, _source) = attached_binder();
        binder.on_changes(&TrackingChanges {
            added: vec![tracked("poster", Pose::from_xyz(1.0, 0.0, 0.0))],
            ..TrackingChanges::default()
        });

        binder.on_changes(&TrackingChanges {
            removed: vec![("poster".into(), None)],
            ..TrackingChanges::default()
        });

        let proxy = binder.scene().proxy("poster");
        assert!(proxy.active);
        assert_eq!(proxy.pose, Pose::from_xyz(1.0, 0.0, 0.0));
    }

    #[test]
    fn unknown_marker_is_skipped_without_aborting_the_batch() {
        let (mut binder, _source) = attached_binder();
        let pose = Pose::from_xyz(0.0, 0.0, 4.0);

        binder.on_changes(&TrackingChanges {
            added: vec![
                tracked("mug", Pose::from_xyz(9.0, 9.0, 9.0)),
                tracked("badge", pose),
            ],
            ..TrackingChanges::default()
        });

        let proxy = binder.scene().proxy("badge");
        assert!(proxy.active, "sibling entries must still be processed");
        assert_eq!(proxy.pose, pose);
    }

    #[test]
    fn attach_fails_explicitly_when_tracking_is_unavailable() {
        let mut source = FakeSource::unavailable();
        let mut binder =
            MarkerBinder::new(two_marker_config(), RecordingScene::default()).unwrap();

        let err = binder.attach(&mut source).unwrap_err();
        assert!(matches!(err, BinderError::TrackingUnavailable(_)));
        assert!(!binder.is_attached());

        // Notifications delivered anyway must not reach the scene.
        binder.on_changes(&TrackingChanges {
            added: vec![tracked("poster", Pose::from_xyz(1.0, 1.0, 1.0))],
            ..TrackingChanges::default()
        });
        assert!(!binder.scene().proxy("poster").active);
    }

    #[test]
    fn attach_twice_keeps_the_first_subscription() {
        let (mut binder, mut source) = attached_binder();
        binder.attach(&mut source).unwrap();
        assert!(binder.is_attached());
        assert!(source.active.is_some());
    }

    #[test]
    fn detach_stops_notification_handling_and_is_idempotent() {
        let (mut binder, mut source) = attached_binder();
        let pose = Pose::from_xyz(1.0, 0.0, 0.0);
        binder.on_changes(&TrackingChanges {
            added: vec![tracked("poster", pose)],
            ..TrackingChanges::default()
        });

        binder.detach(&mut source);
        binder.detach(&mut source);
        assert!(!binder.is_attached());
        assert!(source.active.is_none());

        binder.on_changes(&TrackingChanges {
            updated: vec![TrackingReport::new(
                "poster",
                TrackingState::None,
                Pose::identity(),
            )],
            ..TrackingChanges::default()
        });

        let proxy = binder.scene().proxy("poster");
        assert!(proxy.active, "detached binder must ignore notifications");
        assert_eq!(proxy.pose, pose);
    }

    #[test]
    fn detach_before_attach_is_safe() {
        let mut source = FakeSource::new();
        let mut binder =
            MarkerBinder::new(two_marker_config(), RecordingScene::default()).unwrap();
        binder.detach(&mut source);
        assert!(!binder.is_attached());
    }
}
