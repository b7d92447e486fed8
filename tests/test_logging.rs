use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use space_invader::clock::Spawner;
use space_invader::entities::BulletKind;
use space_invader::{tick, GameConfig, InputState, SimulationContext};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::fmt::MakeWriter;

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn stepper_logs_each_tick_with_collisions() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut ctx = SimulationContext::new(GameConfig {
        enemy_spawn_interval_ms: 600_000,
        ..GameConfig::default()
    });
    ctx.state.start();
    ctx.spawner = Spawner::last_spawned_at(Duration::ZERO);
    let mut rng = StdRng::seed_from_u64(3);
    let dt = Duration::from_millis(16);

    // Nothing collides: no summary line.
    tick(&mut ctx, &InputState::default(), dt, &mut rng);
    assert!(!captured.text().contains("collisions resolved"));

    ctx.store.spawn_enemy(390.0, 95.0);
    ctx.store.spawn_bullet(395.0, 110.0, BulletKind::Straight);
    tick(&mut ctx, &InputState::default(), dt, &mut rng);

    let logs = captured.text();
    let summary = logs
        .lines()
        .find(|l| l.contains("collisions resolved"))
        .unwrap_or_else(|| panic!("no summary in logs:\n{logs}"));
    assert!(summary.contains("kill=Some"), "{summary}");
    assert!(summary.contains("score=100"), "{summary}");
}
