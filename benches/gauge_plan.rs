use criterion::{black_box, criterion_group, criterion_main, Criterion};
use speedo_core::{GaugeConfig, GaugeState};
use speedo_render::{paint_plan, GaugeLayout, GaugePlan, Padding};

fn bench_plan(c: &mut Criterion) {
    let config = GaugeConfig::speedometer();
    let mut state = GaugeState::new(&config);
    state.set_max_value(190.0);
    state.set_current_value(95.0);
    let layout = GaugeLayout::new(480.0, 480.0, Padding::default(), config.metrics());

    c.bench_function("gauge_plan_build", |b| {
        b.iter(|| GaugePlan::build(black_box(&config), black_box(&state), black_box(&layout)))
    });
}

fn bench_paint(c: &mut Criterion) {
    let config = GaugeConfig::tachometer();
    let mut state = GaugeState::new(&config);
    state.set_current_value(4200.0);
    let layout = GaugeLayout::new(480.0, 480.0, Padding::default(), config.metrics());
    let plan = GaugePlan::build(&config, &state, &layout);

    let Ok(surface) = cairo::ImageSurface::create(cairo::Format::ARgb32, 480, 480) else {
        return;
    };
    let Ok(cr) = cairo::Context::new(&surface) else {
        return;
    };

    c.bench_function("gauge_paint_480", |b| {
        b.iter(|| paint_plan(&cr, black_box(&plan), &config))
    });
}

criterion_group!(benches, bench_plan, bench_paint);
criterion_main!(benches);
