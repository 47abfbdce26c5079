mod tests {
    use myrtio_lightbar::color::hsv16_to_rgb;
    use myrtio_lightbar::gamma::gamma_rgb;
    use myrtio_lightbar::{
        AnimationError, BeaconConfig, BufferSink, Duration, Instant, PixelBuffer, Rgb,
        RotationAnimator, beacon_samples,
    };

    const SCENARIO: BeaconConfig = BeaconConfig {
        base_index: 0,
        max_brightness: 255,
        revolution: Duration::from_millis(360),
        hue: 0,
    };

    fn run(beacon: &mut RotationAnimator<BufferSink<'_, 4>>, from: u64, to: u64) {
        for t in from..=to {
            beacon.update(Instant::from_millis(t));
        }
    }

    #[test]
    fn test_beacon_samples_peak_alignment() {
        assert_eq!(beacon_samples(0), [255, 0, 0, 0]);
        assert_eq!(beacon_samples(90), [0, 255, 0, 0]);
        assert_eq!(beacon_samples(180), [0, 0, 255, 0]);
        assert_eq!(beacon_samples(270), [0, 0, 0, 255]);
        assert_eq!(beacon_samples(45), [180, 180, 0, 0]);
    }

    #[test]
    fn test_beacon_samples_half_wave() {
        for deg in 0..360 {
            let samples = beacon_samples(deg);
            let lit = samples.iter().filter(|sample| **sample > 0).count();
            assert!(lit <= 2, "{samples:?} at {deg}");

            let peaks = samples.iter().filter(|sample| **sample == 255).count();
            if deg % 90 == 0 {
                assert_eq!(peaks, 1, "{samples:?} at {deg}");
            }
        }
    }

    #[test]
    fn test_beacon_scenario() {
        let pixels = PixelBuffer::<4>::new();
        let mut beacon =
            RotationAnimator::new(&SCENARIO, pixels.sink(), Instant::from_millis(0)).unwrap();
        assert_eq!(beacon.step_delay(), Duration::from_millis(1));

        beacon.update(Instant::from_millis(0));
        assert_eq!(beacon.position_deg(), 0);

        run(&mut beacon, 1, 1);
        assert_eq!(beacon.samples(), [255, 0, 0, 0]);
        assert_eq!(beacon.position_deg(), 1);

        run(&mut beacon, 2, 91);
        assert_eq!(beacon.samples(), [0, 255, 0, 0]);
        assert_eq!(beacon.position_deg(), 91);
    }

    #[test]
    fn test_beacon_position_wraps_before_360() {
        let pixels = PixelBuffer::<4>::new();
        let mut beacon =
            RotationAnimator::new(&SCENARIO, pixels.sink(), Instant::from_millis(0)).unwrap();

        let mut previous = beacon.position_deg();
        for t in 1..=800 {
            beacon.update(Instant::from_millis(t));
            let position = beacon.position_deg();
            assert!(position < 360);
            assert_eq!(position, (previous + 1) % 360);
            previous = position;
        }
    }

    #[test]
    fn test_beacon_revolution_lasts_exact_period() {
        let config = BeaconConfig {
            revolution: Duration::from_millis(1000),
            ..SCENARIO
        };
        let pixels = PixelBuffer::<4>::new();
        let mut beacon =
            RotationAnimator::new(&config, pixels.sink(), Instant::from_millis(0)).unwrap();
        assert_eq!(beacon.step_delay(), Duration::from_millis(2));

        run(&mut beacon, 1, 999);
        assert_eq!(beacon.position_deg(), 359);
        run(&mut beacon, 1000, 1000);
        assert_eq!(beacon.position_deg(), 0);
    }

    #[test]
    fn test_beacon_max_brightness_scales_samples() {
        let config = BeaconConfig {
            max_brightness: 128,
            ..SCENARIO
        };
        let pixels = PixelBuffer::<4>::new();
        let mut beacon =
            RotationAnimator::new(&config, pixels.sink(), Instant::from_millis(0)).unwrap();

        run(&mut beacon, 1, 1);
        assert_eq!(beacon.samples(), [128, 0, 0, 0]);
    }

    #[test]
    fn test_beacon_writes_four_pixels() {
        let pixels = PixelBuffer::<4>::new();
        let mut beacon =
            RotationAnimator::new(&SCENARIO, pixels.sink(), Instant::from_millis(0)).unwrap();

        run(&mut beacon, 1, 1);
        let black = Rgb { r: 0, g: 0, b: 0 };
        assert_eq!(pixels.pixel(0), Some(gamma_rgb(hsv16_to_rgb(0, 255, 255))));
        assert_ne!(pixels.pixel(0), Some(black));
        assert_eq!(pixels.pixel(1), Some(black));
        assert_eq!(pixels.pixel(2), Some(black));
        assert_eq!(pixels.pixel(3), Some(black));
    }

    #[test]
    fn test_beacon_stop_freezes_rotation() {
        let config = BeaconConfig {
            revolution: Duration::from_millis(3600),
            ..SCENARIO
        };
        let pixels = PixelBuffer::<4>::new();
        let mut beacon =
            RotationAnimator::new(&config, pixels.sink(), Instant::from_millis(0)).unwrap();

        run(&mut beacon, 1, 55);
        assert_eq!(beacon.position_deg(), 5);

        beacon.stop(Instant::from_millis(55));
        run(&mut beacon, 56, 2000);
        assert_eq!(beacon.position_deg(), 5);

        beacon.start(Instant::from_millis(2000));
        run(&mut beacon, 2001, 2004);
        assert_eq!(beacon.position_deg(), 5);
        run(&mut beacon, 2005, 2005);
        assert_eq!(beacon.position_deg(), 6);
    }

    #[test]
    fn test_beacon_rejects_short_period() {
        let pixels = PixelBuffer::<4>::new();
        let config = BeaconConfig {
            revolution: Duration::from_millis(359),
            ..SCENARIO
        };
        assert_eq!(
            RotationAnimator::new(&config, pixels.sink(), Instant::from_millis(0)).err(),
            Some(AnimationError::InvalidPeriod)
        );
    }
}
