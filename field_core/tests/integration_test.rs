use field_core::*;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn assert_inside(field: &ParticleField) {
    let bounds = field.bounds;
    for p in field.particles() {
        assert!(
            p.pos.x >= 0.0 && p.pos.x < bounds.width,
            "x={} outside 0..{}",
            p.pos.x,
            bounds.width
        );
        assert!(
            p.pos.y >= 0.0 && p.pos.y < bounds.height,
            "y={} outside 0..{}",
            p.pos.y,
            bounds.height
        );
    }
}

#[test]
fn test_spawn_matches_config() {
    let config = FieldConfig {
        particle_count: 37,
        ..FieldConfig::default()
    };
    let field = ParticleField::new(config.clone(), Bounds::new(800.0, 600.0).unwrap(), 1);

    assert_eq!(field.particle_count(), 37);
    for p in field.particles() {
        assert!(p.vel.x.abs() <= config.speed_range);
        assert!(p.vel.y.abs() <= config.speed_range);
        assert!(p.radius >= config.radius_min && p.radius <= config.radius_max);
        assert!(config.palette.contains(&p.color));
    }
    assert_inside(&field);
}

#[test]
fn test_particles_stay_inside_over_many_steps() {
    // Fast particles in a tiny box hit the walls constantly
    let config = FieldConfig {
        particle_count: 50,
        speed_range: 7.5,
        ..FieldConfig::default()
    };
    let mut field = ParticleField::new(config, Bounds::new(40.0, 30.0).unwrap(), 99);

    for frame in 0..5000 {
        field.step(frame as f64 * FRAME_MS);
        assert_inside(&field);
    }
    assert_eq!(field.particle_count(), 50, "set size is fixed");
}

#[test]
fn test_alpha_in_unit_range_every_frame() {
    let mut field = ParticleField::new(
        FieldConfig::default(),
        Bounds::new(1920.0, 1080.0).unwrap(),
        5,
    );
    for frame in 0..600 {
        field.step(frame as f64 * FRAME_MS);
        for p in field.particles() {
            assert!((0.0..=1.0).contains(&p.alpha), "alpha {}", p.alpha);
        }
    }
}

#[test]
fn test_boundary_reflection_through_step() {
    let mut world = hecs::World::new();
    let mut time = Time::new();
    let bounds = Bounds::new(800.0, 600.0).unwrap();
    let e = create_particle(
        &mut world,
        Particle::new(
            Vec2::new(800.0 - 1e-3, 300.0),
            Vec2::new(0.2, 0.0),
            2.0,
            Rgba::TRANSPARENT,
        ),
    );

    step(&mut world, &mut time, &bounds, 16.0);

    let p = *world.get::<&Particle>(e).unwrap();
    assert!(p.vel.x < 0.0);
    assert!(p.pos.x < 800.0);
    assert_eq!(time.frame, 1);
}

#[test]
fn test_resize_clamps_within_one_step() {
    let mut field = ParticleField::new(
        FieldConfig {
            particle_count: 200,
            ..FieldConfig::default()
        },
        Bounds::new(800.0, 600.0).unwrap(),
        11,
    );
    field.step(0.0);

    field.resize(Bounds::new(400.0, 300.0).unwrap());
    assert_inside(&field);

    field.step(FRAME_MS);
    assert_inside(&field);
    assert_eq!(field.particle_count(), 200);
}

#[test]
fn test_scene_links_respect_distance() {
    let config = FieldConfig {
        particle_count: 120,
        ..FieldConfig::default()
    };
    let mut field = ParticleField::new(config.clone(), Bounds::new(600.0, 400.0).unwrap(), 3);
    field.step(0.0);

    let scene = field.scene(true);
    assert_eq!(scene.dots.len(), 120);
    assert!(!scene.links.is_empty(), "120 particles in 600x400 have neighbours");
    for link in &scene.links {
        let d = link.from.distance(link.to);
        assert!(d < config.connection_distance);
        assert!(link.opacity > 0.0 && link.opacity <= config.link_alpha);
    }

    let plain = field.scene(false);
    assert!(plain.links.is_empty());
    assert_eq!(plain.dots.len(), 120);
}

#[test]
fn test_zero_connection_distance_draws_no_links() {
    let config = FieldConfig {
        connection_distance: 0.0,
        ..FieldConfig::default()
    };
    let mut field = ParticleField::new(config, Bounds::new(100.0, 100.0).unwrap(), 3);
    field.step(0.0);
    assert!(field.scene(true).links.is_empty());
}

#[test]
fn test_same_seed_same_field() {
    let bounds = Bounds::new(800.0, 600.0).unwrap();
    let a = ParticleField::new(FieldConfig::default(), bounds, 42);
    let b = ParticleField::new(FieldConfig::default(), bounds, 42);
    let pa: Vec<Vec2> = a.particles().iter().map(|p| p.pos).collect();
    let pb: Vec<Vec2> = b.particles().iter().map(|p| p.pos).collect();
    assert_eq!(pa, pb);
}

// Renderer lifecycle with fake host pieces

#[derive(Default)]
struct SurfaceLog {
    draws: usize,
    dots_last: usize,
    links_last: usize,
    backdrop_only: usize,
    resizes: Vec<(u32, u32)>,
}

struct FakeSurface {
    size: (u32, u32),
    log: Rc<RefCell<SurfaceLog>>,
    fail_after: Option<usize>,
}

impl FakeSurface {
    fn boxed(size: (u32, u32), log: &Rc<RefCell<SurfaceLog>>) -> Box<dyn Surface> {
        Box::new(Self {
            size,
            log: log.clone(),
            fail_after: None,
        })
    }
}

impl Surface for FakeSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.log.borrow_mut().resizes.push((width, height));
    }

    fn draw(&mut self, scene: &FrameScene) -> Result<(), RenderError> {
        let mut log = self.log.borrow_mut();
        if let Some(limit) = self.fail_after {
            if log.draws >= limit {
                return Err(RenderError::Draw("lost context".into()));
            }
        }
        log.draws += 1;
        log.dots_last = scene.dots.len();
        log.links_last = scene.links.len();
        if scene.is_empty() {
            log.backdrop_only += 1;
        }
        Ok(())
    }
}

#[derive(Default)]
struct SchedulerLog {
    requested: Vec<i32>,
    cancelled: Vec<i32>,
    refuse: bool,
}

struct FakeScheduler {
    next: i32,
    log: Rc<RefCell<SchedulerLog>>,
}

impl FrameScheduler for FakeScheduler {
    fn request_frame(&mut self) -> Result<i32, RenderError> {
        let mut log = self.log.borrow_mut();
        if log.refuse {
            return Err(RenderError::Schedule("no window".into()));
        }
        self.next += 1;
        log.requested.push(self.next);
        Ok(self.next)
    }

    fn cancel_frame(&mut self, handle: i32) {
        self.log.borrow_mut().cancelled.push(handle);
    }
}

fn fake_scheduler(log: &Rc<RefCell<SchedulerLog>>) -> Box<dyn FrameScheduler> {
    Box::new(FakeScheduler {
        next: 0,
        log: log.clone(),
    })
}

fn primary_renderer(
    surface_log: &Rc<RefCell<SurfaceLog>>,
    scheduler_log: &Rc<RefCell<SchedulerLog>>,
) -> ParticleRenderer {
    let backend = select_backend(
        Ok(FakeSurface::boxed((800, 600), surface_log)),
        || panic!("fallback must not be tried"),
        || panic!("static must not be tried"),
    );
    ParticleRenderer::new(backend, fake_scheduler(scheduler_log))
}

#[test]
fn test_start_draws_and_schedules() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    let mut renderer = primary_renderer(&surface_log, &scheduler_log);

    renderer.start(FieldConfig::default(), 1);

    assert_eq!(renderer.mode(), RenderMode::Primary);
    assert!(renderer.is_running());
    assert!(renderer.has_pending_frame());
    assert_eq!(surface_log.borrow().draws, 1);
    assert_eq!(surface_log.borrow().dots_last, Params::PARTICLE_COUNT);

    for i in 1..=10 {
        renderer.on_frame(i as f64 * FRAME_MS);
    }
    assert_eq!(surface_log.borrow().draws, 11);
    assert_eq!(renderer.frames_drawn(), 11);
    assert_eq!(scheduler_log.borrow().requested.len(), 11);
}

#[test]
fn test_stop_prevents_further_draws() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    let mut renderer = primary_renderer(&surface_log, &scheduler_log);

    renderer.start(FieldConfig::default(), 1);
    renderer.on_frame(FRAME_MS);
    let pending = *scheduler_log.borrow().requested.last().unwrap();

    renderer.stop();
    let draws = surface_log.borrow().draws;
    assert_eq!(scheduler_log.borrow().cancelled, vec![pending]);
    assert!(!renderer.has_pending_frame());

    // A callback the host had already queued still arrives
    for i in 2..20 {
        renderer.on_frame(i as f64 * FRAME_MS);
    }
    assert_eq!(surface_log.borrow().draws, draws);
    assert_eq!(renderer.frames_drawn(), draws as u64);

    // Idempotent
    renderer.stop();
    assert_eq!(scheduler_log.borrow().cancelled.len(), 1);
}

#[test]
fn test_restart_after_stop_reinitializes() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    let mut renderer = primary_renderer(&surface_log, &scheduler_log);

    renderer.start(FieldConfig::default(), 1);
    renderer.stop();

    let config = FieldConfig {
        particle_count: 12,
        ..FieldConfig::default()
    };
    renderer.start(config, 2);

    assert!(renderer.is_running());
    assert_eq!(renderer.field().unwrap().particle_count(), 12);
    assert_eq!(surface_log.borrow().dots_last, 12);
}

#[test]
fn test_start_while_running_cancels_previous_frame() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    let mut renderer = primary_renderer(&surface_log, &scheduler_log);

    renderer.start(FieldConfig::default(), 1);
    renderer.start(FieldConfig::default(), 2);

    assert_eq!(scheduler_log.borrow().cancelled, vec![1]);
    assert!(renderer.is_running());
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    let mut renderer = primary_renderer(&surface_log, &scheduler_log);

    renderer.start(
        FieldConfig {
            particle_count: 0,
            ..FieldConfig::default()
        },
        1,
    );

    assert!(renderer.is_running());
    assert_eq!(renderer.config(), &FieldConfig::default());
}

#[test]
fn test_primary_draws_links_fallback_does_not() {
    let config = FieldConfig {
        particle_count: 150,
        ..FieldConfig::default()
    };

    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    let mut primary = primary_renderer(&surface_log, &scheduler_log);
    primary.start(config.clone(), 4);
    assert!(surface_log.borrow().links_last > 0);

    let fallback_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let backend = select_backend(
        Err(RenderError::Initialization("no WebGPU".into())),
        || Ok(FakeSurface::boxed((800, 600), &fallback_log)),
        || panic!("static must not be tried"),
    );
    let mut fallback = ParticleRenderer::new(backend, fake_scheduler(&scheduler_log));
    fallback.start(config, 4);

    assert_eq!(fallback.mode(), RenderMode::Fallback);
    assert!(fallback.is_running());
    assert_eq!(fallback_log.borrow().dots_last, 150);
    assert_eq!(fallback_log.borrow().links_last, 0);
}

/// A canvas keeps whichever context kind it handed out first
#[derive(Default)]
struct FakeCanvas {
    context: RefCell<Option<&'static str>>,
}

impl FakeCanvas {
    fn get_context(&self, kind: &'static str) -> Option<&'static str> {
        let mut bound = self.context.borrow_mut();
        match *bound {
            Some(existing) if existing != kind => None,
            _ => {
                *bound = Some(kind);
                Some(kind)
            }
        }
    }
}

/// GPU device acquired first; the canvas is only bound once it exists
fn gpu_surface(
    canvas: &FakeCanvas,
    adapter_found: bool,
    log: &Rc<RefCell<SurfaceLog>>,
) -> Result<Box<dyn Surface>, RenderError> {
    if !adapter_found {
        return Err(RenderError::Initialization("Failed to find adapter".into()));
    }
    canvas
        .get_context("webgpu")
        .ok_or_else(|| RenderError::Initialization("canvas already bound".into()))?;
    Ok(FakeSurface::boxed((800, 600), log))
}

fn canvas_2d_surface(
    canvas: &FakeCanvas,
    log: &Rc<RefCell<SurfaceLog>>,
) -> Result<Box<dyn Surface>, RenderError> {
    canvas
        .get_context("2d")
        .ok_or_else(|| RenderError::Initialization("canvas has no 2d context".into()))?;
    Ok(FakeSurface::boxed((800, 600), log))
}

#[test]
fn test_missing_adapter_still_leaves_2d_canvas() {
    let canvas = FakeCanvas::default();
    let gpu_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let fallback_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));

    let backend = select_backend(
        gpu_surface(&canvas, false, &gpu_log),
        || canvas_2d_surface(&canvas, &fallback_log),
        || panic!("static must not be tried"),
    );
    let mut renderer = ParticleRenderer::new(backend, fake_scheduler(&scheduler_log));
    renderer.start(FieldConfig::default(), 1);

    assert_eq!(renderer.mode(), RenderMode::Fallback);
    assert!(renderer.is_running());
    assert_eq!(*canvas.context.borrow(), Some("2d"));
    assert_eq!(fallback_log.borrow().dots_last, Params::PARTICLE_COUNT);
    assert_eq!(gpu_log.borrow().draws, 0);
}

#[test]
fn test_bound_gpu_canvas_refuses_2d() {
    let canvas = FakeCanvas::default();
    let log = Rc::new(RefCell::new(SurfaceLog::default()));

    assert!(gpu_surface(&canvas, true, &log).is_ok());
    assert!(canvas_2d_surface(&canvas, &log).is_err());
}

#[test]
fn test_no_backends_paints_static_gradient() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    let backend = select_backend(
        Err(RenderError::Initialization("no WebGPU".into())),
        || Err(RenderError::Initialization("no 2d context".into())),
        || FakeSurface::boxed((800, 600), &surface_log),
    );
    let mut renderer = ParticleRenderer::new(backend, fake_scheduler(&scheduler_log));

    renderer.start(FieldConfig::default(), 1);

    assert_eq!(renderer.mode(), RenderMode::Static);
    assert!(!renderer.is_running());
    assert_eq!(surface_log.borrow().backdrop_only, 1);
    assert!(scheduler_log.borrow().requested.is_empty());

    renderer.on_frame(FRAME_MS);
    assert_eq!(surface_log.borrow().draws, 1);
    assert_eq!(renderer.frames_drawn(), 1);

    // The gradient survives a canvas resize
    renderer.on_resize(1024, 768);
    assert_eq!(surface_log.borrow().backdrop_only, 2);
    assert_eq!(renderer.frames_drawn(), 2);
    assert!(!renderer.is_running());
}

#[test]
fn test_draw_error_ends_loop() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    let surface = Box::new(FakeSurface {
        size: (800, 600),
        log: surface_log.clone(),
        fail_after: Some(3),
    });
    let backend = Backend::new(RenderMode::Primary, surface);
    let mut renderer = ParticleRenderer::new(backend, fake_scheduler(&scheduler_log));

    renderer.start(FieldConfig::default(), 1);
    for i in 1..10 {
        renderer.on_frame(i as f64 * FRAME_MS);
    }

    assert!(!renderer.is_running());
    assert_eq!(surface_log.borrow().draws, 3);
    assert_eq!(scheduler_log.borrow().requested.len(), 3);
}

#[test]
fn test_schedule_refusal_ends_loop() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog {
        refuse: true,
        ..SchedulerLog::default()
    }));
    let mut renderer = primary_renderer(&surface_log, &scheduler_log);

    renderer.start(FieldConfig::default(), 1);

    assert!(!renderer.is_running());
    assert_eq!(surface_log.borrow().draws, 1, "first frame still painted");
}

#[test]
fn test_renderer_resize_scenario() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    let mut renderer = primary_renderer(&surface_log, &scheduler_log);
    renderer.start(
        FieldConfig {
            particle_count: 150,
            ..FieldConfig::default()
        },
        8,
    );

    renderer.on_resize(400, 300);
    renderer.on_frame(FRAME_MS);

    let field = renderer.field().unwrap();
    assert_eq!(field.bounds, Bounds::new(400.0, 300.0).unwrap());
    for p in field.particles() {
        assert!(p.pos.x >= 0.0 && p.pos.x < 400.0);
        assert!(p.pos.y >= 0.0 && p.pos.y < 300.0);
    }
    assert_eq!(surface_log.borrow().resizes, vec![(400, 300)]);
}

#[test]
fn test_zero_resize_ignored() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    let mut renderer = primary_renderer(&surface_log, &scheduler_log);
    renderer.start(FieldConfig::default(), 1);

    renderer.on_resize(0, 300);

    assert!(surface_log.borrow().resizes.is_empty());
    assert_eq!(
        renderer.field().unwrap().bounds,
        Bounds::new(800.0, 600.0).unwrap()
    );
}

#[test]
fn test_drop_cancels_pending_frame() {
    let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
    let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
    {
        let mut renderer = primary_renderer(&surface_log, &scheduler_log);
        renderer.start(FieldConfig::default(), 1);
    }
    assert_eq!(scheduler_log.borrow().cancelled, vec![1]);
}
