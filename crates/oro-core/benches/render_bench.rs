//! Criterion benchmarks for the oro-core render loop
//!
//! Run with: cargo bench -p oro-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use oro_core::{
    AudioBuffer, AudioUnit, ChannelCounts, ParamDescriptor, ParameterInfo, ProcessError,
    SampleEvent, TestCase, Timeline, render, slice_for_window,
};

const SAMPLE_RATE: u32 = 48000;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

/// Sine generator with running phase.
struct Sine {
    phase: f32,
    inc: f32,
}

impl ParameterInfo for Sine {
    fn param_count(&self) -> usize {
        0
    }
    fn param_info(&self, _: usize) -> Option<ParamDescriptor> {
        None
    }
    fn get_param(&self, _: usize) -> f32 {
        0.0
    }
    fn set_param(&mut self, _: usize, _: f32) {}
}

impl AudioUnit for Sine {
    fn prepare(&mut self, sample_rate: f32, _: usize) {
        self.phase = 0.0;
        self.inc = 440.0 / sample_rate;
    }

    fn process(&mut self, buffer: &mut AudioBuffer, _: &[SampleEvent]) -> Result<(), ProcessError> {
        for i in 0..buffer.num_frames() {
            let s = (self.phase * std::f32::consts::TAU).sin();
            buffer.channel_mut(0)[i] = s;
            buffer.channel_mut(1)[i] = s;
            self.phase = (self.phase + self.inc).fract();
        }
        Ok(())
    }

    fn channel_counts(&self) -> ChannelCounts {
        ChannelCounts::generator(2)
    }
}

fn dense_case(block_size: usize) -> TestCase {
    let mut case = TestCase::new("bench", "")
        .with_duration(1.0)
        .with_sample_rate(SAMPLE_RATE)
        .with_block_size(block_size);
    for i in 0..200u8 {
        case.add_note(36 + i % 48, 0.7, f64::from(i) * 0.004, 0.05);
    }
    case
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("Render");

    for &block_size in BLOCK_SIZES {
        let case = dense_case(block_size);
        group.bench_with_input(
            BenchmarkId::new("one_second_stereo", block_size),
            &block_size,
            |b, _| {
                let mut unit = Sine { phase: 0.0, inc: 0.0 };
                b.iter(|| {
                    unit.prepare(SAMPLE_RATE as f32, block_size);
                    black_box(render(&mut unit, black_box(&case)).map(|a| a.sample_count()))
                });
            },
        );
    }

    group.finish();
}

fn bench_slicing(c: &mut Criterion) {
    let mut timeline = Timeline::new();
    for i in 0..1000u32 {
        timeline.add_note((i % 128) as u8, 0.5, f64::from(i) * 0.001, 0.01);
    }
    let events = timeline.build_event_buffer(SAMPLE_RATE);

    c.bench_function("slice_for_window/2000_events", |b| {
        b.iter(|| black_box(slice_for_window(black_box(&events), 24_000, 512)));
    });
}

criterion_group!(benches, bench_render, bench_slicing);
criterion_main!(benches);
