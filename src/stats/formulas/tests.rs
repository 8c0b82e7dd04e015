//! Unit tests for stat formulas

use super::*;

fn line(build: impl FnOnce(&mut BattingLine)) -> BattingLine {
    let mut line = BattingLine::default();
    build(&mut line);
    line
}

#[cfg(test)]
mod rate_tests {
    use super::*;

    #[test]
    fn test_iso_is_slg_minus_avg() {
        let l = line(|l| {
            l.slg = 0.550;
            l.avg = 0.300;
        });
        assert_eq!(iso(&l), "0.250");
    }

    #[test]
    fn test_iso_never_prints_negative_zero() {
        let l = line(|l| {
            l.slg = 0.3;
            l.avg = 0.3000001;
        });
        assert_eq!(iso(&l), "0.000");
        assert_eq!(iso(&BattingLine::default()), "0.000");
    }

    #[test]
    fn test_woba() {
        // 100 AB, 30 H (20 1B, 5 2B, 1 3B, 4 HR), 10 BB, 2 HBP, 3 SF
        let l = line(|l| {
            l.at_bats = 100.0;
            l.hits = 30.0;
            l.doubles = 5.0;
            l.triples = 1.0;
            l.home_runs = 4.0;
            l.walks = 10.0;
            l.hit_by_pitch = 2.0;
            l.sac_flies = 3.0;
        });
        // (6.9 + 1.44 + 17.6 + 6.35 + 1.62 + 8.4) / 115 = 0.368
        assert_eq!(woba(&l), "0.368");
    }

    #[test]
    fn test_zero_denominators_use_zero_strings() {
        let empty = BattingLine::default();
        assert_eq!(woba(&empty), ".000");
        assert_eq!(babip(&empty), ".000");
        assert_eq!(secondary_average(&empty), ".000");
        assert_eq!(bb_percent(&empty), "0.0");
        assert_eq!(k_percent(&empty), "0.0");
        assert_eq!(base_runs(&empty), "0.0");
    }

    #[test]
    fn test_babip() {
        let l = line(|l| {
            l.at_bats = 500.0;
            l.hits = 150.0;
            l.home_runs = 30.0;
            l.strikeouts = 120.0;
            l.sac_flies = 5.0;
        });
        // 120 / 355
        assert_eq!(babip(&l), "0.338");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        let walk = line(|l| {
            l.plate_appearances = 16.0;
            l.walks = 1.0;
        });
        // 6.25%
        assert_eq!(bb_percent(&walk), "6.3");

        let small_sample = line(|l| {
            l.at_bats = 16.0;
            l.hits = 5.0;
        });
        // 5 / 16 = 0.3125
        assert_eq!(babip(&small_sample), "0.313");

        assert_eq!(fixed(0.0625, 3), "0.063");
        assert_eq!(fixed(-0.0625, 3), "-0.063");
        assert_eq!(fixed(-0.0004, 3), "0.000");
    }

    #[test]
    fn test_percent_rates_fall_back_to_at_bats() {
        let with_pa = line(|l| {
            l.plate_appearances = 600.0;
            l.at_bats = 520.0;
            l.walks = 60.0;
            l.strikeouts = 150.0;
        });
        assert_eq!(bb_percent(&with_pa), "10.0");
        assert_eq!(k_percent(&with_pa), "25.0");

        let ab_only = line(|l| {
            l.at_bats = 400.0;
            l.walks = 40.0;
        });
        assert_eq!(bb_percent(&ab_only), "10.0");
    }

    #[test]
    fn test_secondary_average_and_base_runs() {
        let l = line(|l| {
            l.at_bats = 500.0;
            l.hits = 150.0;
            l.total_bases = 250.0;
            l.walks = 50.0;
            l.stolen_bases = 10.0;
            l.home_runs = 25.0;
        });
        // (250 - 150 + 50 + 10) / 500
        assert_eq!(secondary_average(&l), "0.320");
        // A = 175, B = 350 - 90 + 150 = 410, C = 350, D = 25
        assert_eq!(base_runs(&l), "119.4");
    }

    #[test]
    fn test_plate_appearances_sum() {
        let l = line(|l| {
            l.at_bats = 500.0;
            l.walks = 50.0;
            l.hit_by_pitch = 5.0;
            l.sac_flies = 4.0;
            l.sac_hits = 1.0;
        });
        assert_eq!(plate_appearances(&l), 560.0);
    }
}

#[cfg(test)]
mod rating_tests {
    use super::*;

    #[test]
    fn test_ops_tiers() {
        assert_eq!(ops_rating(0.950).tier, "A+");
        assert_eq!(ops_rating(0.800).tier, "A");
        assert_eq!(ops_rating(0.760).label, "Above Average");
        assert_eq!(ops_rating(0.700).tier, "B");
        assert_eq!(ops_rating(0.660).tier, "C");
        assert_eq!(ops_rating(0.0).label, "Poor");
    }

    #[test]
    fn test_era_tiers_and_missing_era() {
        assert_eq!(era_rating(2.10).tier, "A+");
        assert_eq!(era_rating(3.50).tier, "A");
        assert_eq!(era_rating(3.90).tier, "B+");
        assert_eq!(era_rating(4.40).tier, "B");
        assert_eq!(era_rating(5.00).tier, "C");
        assert_eq!(era_rating(6.20).tier, "D");
        assert_eq!(era_rating(0.0).tier, "D");
    }

    #[test]
    fn test_format_stat_rules() {
        assert_eq!(format_stat("AVG", Some(0.3)), "0.300");
        assert_eq!(format_stat("K%", Some(0.234)), "23.4%");
        assert_eq!(format_stat("W-L%", Some(0.5)), "50.0%");
        assert_eq!(format_stat("ERA", Some(3.14159)), "3.14");
        assert_eq!(format_stat("IP", Some(180.33)), "180.3");
        assert_eq!(format_stat("HR", Some(41.6)), "42");
        assert_eq!(format_stat("HR", None), "-");
    }

    #[test]
    fn test_lower_is_better_stats() {
        assert!(is_lower_better("ERA"));
        assert!(is_lower_better("SO"));
        assert!(!is_lower_better("OPS"));
    }
}

#[cfg(test)]
mod percentile_tests {
    use super::*;

    #[test]
    fn test_percentile_empty_population_is_fifty() {
        assert_eq!(percentile(0.300, &[]), 50);
    }

    #[test]
    fn test_percentile_positions() {
        let population = [0.250, 0.300, 0.200, 0.350];
        assert_eq!(percentile(0.100, &population), 0);
        assert_eq!(percentile(0.250, &population), 25);
        assert_eq!(percentile(0.300, &population), 50);
        assert_eq!(percentile(0.400, &population), 100);
    }

    #[test]
    fn test_percentile_is_monotone() {
        let population: Vec<f64> = (0..40).map(|i| f64::from(i) * 0.01).collect();
        let mut previous = 0;
        for step in 0..60 {
            let p = percentile(f64::from(step) * 0.01, &population);
            assert!(p >= previous);
            previous = p;
        }
    }

    #[test]
    fn test_percentile_rank_direction() {
        let eras = [2.5, 3.0, 4.0, 5.0];
        assert_eq!(percentile_rank(2.5, &eras, true), 75);
        assert_eq!(percentile_rank(5.0, &eras, true), 0);

        let homers = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_rank(40.0, &homers, false), 75);
        assert_eq!(percentile_rank(1.0, &[], false), 0);
    }

    #[test]
    fn test_percentile_labels() {
        assert_eq!(percentile_label(95), "Elite");
        assert_eq!(percentile_label(80), "Great");
        assert_eq!(percentile_label(50), "Above Avg");
        assert_eq!(percentile_label(30), "Below Avg");
        assert_eq!(percentile_label(3), "Poor");
    }
}

#[cfg(test)]
mod series_tests {
    use super::*;

    #[test]
    fn test_trend_direction() {
        let up = trend_direction(0.800, 0.750);
        assert_eq!(up.direction, Direction::Up);
        assert_eq!(up.change, 6.7);
        assert!(up.is_positive());

        assert_eq!(trend_direction(3.0, 4.0).direction, Direction::Down);
        assert_eq!(trend_direction(1.0, 0.0).direction, Direction::Neutral);
        assert_eq!(trend_direction(2.0, 2.0).change, 0.0);
    }

    #[test]
    fn test_rolling_average() {
        assert_eq!(
            rolling_average(&[1.0, 2.0, 3.0, 4.0], 2),
            vec![None, Some(1.5), Some(2.5), Some(3.5)]
        );
        assert_eq!(rolling_average(&[1.0, 2.0], 5), vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_streaks_use_last_ten_games() {
        let mut log = vec![0.0; 5];
        log.extend([1.0; 10]);
        let hot = identify_streaks(&log, 0.5);
        assert!(hot.hot);
        assert_eq!(hot.games, 10);
        assert_eq!(hot.average, Some(1.0));

        let cold = identify_streaks(&[0.1, 0.1], 0.3);
        assert!(cold.cold);
        assert_eq!(cold.games, 2);

        let neutral = identify_streaks(&[0.3], 0.3);
        assert!(!neutral.hot && !neutral.cold);
        assert_eq!(neutral.games, 0);

        assert_eq!(identify_streaks(&[], 0.3).average, None);
    }

    #[test]
    fn test_consistency() {
        assert_eq!(consistency(&[]), 0.0);
        assert_eq!(consistency(&[2.0, 2.0, 2.0]), 100.0);
        assert_eq!(consistency(&[0.0, 0.0]), 0.0);
        // mean 2, sd 1, cv 50
        assert!((consistency(&[1.0, 3.0]) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_benchmarks() {
        assert_eq!(position_benchmarks("C").hr, 15.0);
        assert_eq!(position_benchmarks("dh").ops, 0.820);
        assert_eq!(position_benchmarks("P"), position_benchmarks("RF"));
    }
}
