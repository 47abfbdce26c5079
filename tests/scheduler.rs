mod tests {
    use myrtio_lightbar::{
        Animation, AnimationError, BeaconConfig, CommandChannel, Duration, FrameScheduler,
        Instant, OutputDriver, PixelBuffer, PulseAnimator, PulseConfig, PulsePhase, Rgb,
        RigCommand, RotationAnimator,
    };

    const LEDS: usize = 7;

    #[derive(Default)]
    struct RecordingDriver {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    fn pulse_config(index: usize) -> PulseConfig {
        PulseConfig {
            index,
            max_brightness: 10,
            min_brightness: 0,
            on_max: Duration::from_millis(100),
            on_min: Duration::from_millis(100),
            pulse: Duration::from_millis(1000),
            start_brightness: 0,
            hue: 0,
            saturation: 100,
        }
    }

    fn beacon_config(base_index: usize) -> BeaconConfig {
        BeaconConfig {
            base_index,
            max_brightness: 255,
            revolution: Duration::from_millis(360),
            hue: 240,
        }
    }

    #[test]
    fn test_scheduler_registers_disjoint_spans() {
        let pixels = PixelBuffer::<LEDS>::new();
        let now = Instant::from_millis(0);
        let mut scheduler =
            FrameScheduler::<_, LEDS, 4, 1>::new(&pixels, RecordingDriver::default());

        let left = PulseAnimator::new(&pulse_config(0), pixels.sink(), now).unwrap();
        let beacon = RotationAnimator::new(&beacon_config(3), pixels.sink(), now).unwrap();
        assert_eq!(scheduler.add(left.into()), Ok(0));
        assert_eq!(scheduler.add(beacon.into()), Ok(1));

        let overlapping = PulseAnimator::new(&pulse_config(5), pixels.sink(), now).unwrap();
        assert_eq!(
            scheduler.add(overlapping.into()),
            Err(AnimationError::OverlappingPixels)
        );

        let outside = RotationAnimator::new(&beacon_config(5), pixels.sink(), now).unwrap();
        assert_eq!(scheduler.add(outside.into()), Err(AnimationError::OutOfBounds));

        assert_eq!(scheduler.animations().len(), 2);
        assert!(scheduler.animation(1).and_then(|slot| slot.as_beacon()).is_some());
    }

    #[test]
    fn test_scheduler_capacity() {
        let pixels = PixelBuffer::<LEDS>::new();
        let now = Instant::from_millis(0);
        let mut scheduler =
            FrameScheduler::<_, LEDS, 2, 1>::new(&pixels, RecordingDriver::default());

        for index in 0..2 {
            let pulse = PulseAnimator::new(&pulse_config(index), pixels.sink(), now).unwrap();
            assert!(scheduler.add(pulse.into()).is_ok());
        }
        let pulse = PulseAnimator::new(&pulse_config(2), pixels.sink(), now).unwrap();
        assert_eq!(
            scheduler.add(pulse.into()),
            Err(AnimationError::CapacityExceeded)
        );
    }

    #[test]
    fn test_scheduler_tick_updates_and_flushes() {
        let pixels = PixelBuffer::<LEDS>::new();
        let now = Instant::from_millis(0);
        let mut scheduler = FrameScheduler::<_, LEDS, 4, 1>::with_frame_duration(
            &pixels,
            RecordingDriver::default(),
            Duration::from_millis(1),
        );
        let pulse = PulseAnimator::new(&pulse_config(0), pixels.sink(), now).unwrap();
        let beacon = RotationAnimator::new(&beacon_config(3), pixels.sink(), now).unwrap();
        scheduler.add(pulse.into()).unwrap();
        scheduler.add(beacon.into()).unwrap();

        for t in 1..=1000 {
            scheduler.tick(Instant::from_millis(t));
        }

        let frames = &scheduler.output().frames;
        assert_eq!(frames.len(), 1000);
        assert!(frames.iter().all(|frame| frame.len() == LEDS));
        assert_eq!(frames.last(), Some(&pixels.snapshot().to_vec()));

        let pulse = scheduler.animation(0).and_then(|slot| slot.as_pulse()).unwrap();
        assert_eq!(pulse.phase(), PulsePhase::OnMax);
        let beacon = scheduler.animation(1).and_then(|slot| slot.as_beacon()).unwrap();
        assert_eq!(beacon.position_deg(), 1000 % 360);
    }

    #[test]
    fn test_scheduler_sleep_duration() {
        let pixels = PixelBuffer::<LEDS>::new();
        let mut scheduler =
            FrameScheduler::<_, LEDS, 1, 1>::new(&pixels, RecordingDriver::default());

        let result = scheduler.tick(Instant::from_millis(1000));
        assert_eq!(result.next_deadline, Instant::from_millis(1010));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));

        let result = scheduler.tick(Instant::from_millis(1004));
        assert_eq!(result.next_deadline, Instant::from_millis(1020));
        assert_eq!(result.sleep_duration, Duration::from_millis(16));
    }

    #[test]
    fn test_scheduler_commands_pause_animations() {
        let commands = CommandChannel::<4>::new();
        let pixels = PixelBuffer::<LEDS>::new();
        let now = Instant::from_millis(0);
        let mut scheduler = FrameScheduler::<_, LEDS, 4, 4>::with_frame_duration(
            &pixels,
            RecordingDriver::default(),
            Duration::from_millis(1),
        )
        .with_commands(commands.receiver());
        let pulse = PulseAnimator::new(&pulse_config(0), pixels.sink(), now).unwrap();
        let beacon = RotationAnimator::new(&beacon_config(3), pixels.sink(), now).unwrap();
        scheduler.add(pulse.into()).unwrap();
        scheduler.add(beacon.into()).unwrap();

        let sender = commands.sender();
        sender.try_send(RigCommand::StopAll).unwrap();
        for t in 1..=500 {
            scheduler.tick(Instant::from_millis(t));
        }
        assert!(commands.is_empty());
        assert!(scheduler.animations().iter().all(|slot| !slot.is_running()));
        let beacon = scheduler.animation(1).and_then(|slot| slot.as_beacon()).unwrap();
        assert_eq!(beacon.position_deg(), 0);

        sender.try_send(RigCommand::Toggle(1)).unwrap();
        scheduler.tick(Instant::from_millis(501));
        assert!(!scheduler.animation(0).unwrap().is_running());
        assert!(scheduler.animation(1).unwrap().is_running());

        sender.try_send(RigCommand::Start(0)).unwrap();
        sender.try_send(RigCommand::Stop(7)).unwrap();
        scheduler.tick(Instant::from_millis(502));
        assert!(scheduler.animations().iter().all(|slot| slot.is_running()));
    }
}
