//! Properties of the expand → assemble → color pipeline

use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use roster_core::{
    assemble, expand, Color, RoleColumn, RolePair, RoleSelections, RosterConfig, DAY_LABELS,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// ============================================================================
// Calendar
// ============================================================================

#[test]
fn expansion_length_and_dates_for_many_starts() {
    let starts = [
        date(2024, 1, 1),
        date(2023, 12, 28),
        date(2024, 2, 29),
        date(1999, 12, 31),
    ];

    for start in starts {
        for weeks in [1, 2, 5, 10, 52] {
            let rows = expand(start, weeks).unwrap();
            assert_eq!(rows.len(), 7 * weeks as usize);

            for (i, row) in rows.iter().enumerate() {
                assert_eq!(row.date, start + Duration::days(i as i64));
                assert_eq!(row.day_label, DAY_LABELS[i % 7]);
                assert_eq!(row.week_label, format!("Week {}", i / 7 + 1));
            }
        }
    }
}

#[test]
fn dates_strictly_increase() {
    let rows = expand(date(2024, 12, 23), 3).unwrap();
    assert!(rows.windows(2).all(|pair| pair[0].date < pair[1].date));
}

// ============================================================================
// Assembly
// ============================================================================

#[test]
fn end_to_end_first_week_of_2024() {
    let config = RosterConfig::default();
    let calendar = expand(date(2024, 1, 1), 1).unwrap();

    let dates: Vec<String> = calendar.iter().map(|r| r.display_date()).collect();
    assert_eq!(
        dates,
        vec![
            "01/01/2024",
            "02/01/2024",
            "03/01/2024",
            "04/01/2024",
            "05/01/2024",
            "06/01/2024",
            "07/01/2024",
        ]
    );

    let mut selections = RoleSelections::new();
    selections.insert(0, RolePair::new("E - 8-6", "E - 8-6"));

    let table = assemble(&calendar, &selections);
    let first = &table.rows[0];
    assert_eq!(first.match_indicator().label(), "MATCH");
    assert_eq!(
        config.colors.color_of(first.match_indicator().label()).to_string(),
        "#90EE90"
    );

    for row in &table.rows[1..] {
        assert_eq!(row.student_role.as_str(), "");
        assert_eq!(
            config.colors.color_of(row.student_role.as_str()).to_string(),
            "#FFFFFF"
        );
    }
}

#[test]
fn match_law_over_vocabulary() {
    let config = RosterConfig::default();
    let calendar = expand(date(2024, 1, 1), 3).unwrap();

    let mut selections = RoleSelections::new();
    let mut expected = Vec::new();
    let mut index = 0;
    for student in &config.roles {
        for supervisor in &config.roles {
            selections.insert(index, RolePair::new(student.clone(), supervisor.clone()));
            let label = if !student.is_empty() && student == supervisor {
                "MATCH".to_string()
            } else {
                student.to_string()
            };
            expected.push(label);
            index += 1;
        }
    }

    let table = assemble(&calendar, &selections);
    for (i, label) in expected.iter().enumerate() {
        assert_eq!(table.rows[i].match_indicator().label(), label, "row {i}");
    }
}

#[test]
fn missing_selections_fail_soft() {
    let calendar = expand(date(2024, 1, 1), 4).unwrap();
    let selections: RoleSelections = [(5, RolePair::new("LD - 8-7", "LD - 8-7"))]
        .into_iter()
        .collect();

    let table = assemble(&calendar, &selections);
    assert_eq!(table.len(), 28);
    for (i, row) in table.iter().enumerate() {
        if i == 5 {
            assert!(row.match_indicator().is_match());
        } else {
            assert!(row.student_role.is_empty());
            assert!(row.supervisor_role.is_empty());
            assert_eq!(row.match_indicator().label(), "");
        }
    }
}

// ============================================================================
// Colors
// ============================================================================

#[test]
fn color_lookup_is_total() {
    let config = RosterConfig::default();
    for label in ["", "MATCH", "E - 8-6", "LD - 8-7", "SL - Sick Leave"] {
        assert!(config.colors.contains(label), "{label:?}");
    }
    // Lookups are exact: case and whitespace variants are unmapped
    for label in ["e - 8-6", "Night shift", "🙂", "MATCH ", "match"] {
        assert!(!config.colors.contains(label));
        assert_eq!(config.colors.color_of(label), Color::WHITE, "{label:?}");
    }
}

#[test]
fn colored_cells_agree_with_color_of() {
    let config = RosterConfig::default();
    let calendar = expand(date(2024, 1, 1), 2).unwrap();
    let selections: RoleSelections = [
        (0, RolePair::new("E - 8-6", "E - 8-6")),
        (1, RolePair::new("LD - 8-7", "E - 8-6")),
        (8, RolePair::new("SL - Sick Leave", "SL - Sick Leave")),
        (9, RolePair::new("", "LD - 8-7")),
    ]
    .into_iter()
    .collect();

    let table = assemble(&calendar, &selections);
    let cells = table.colored_cells(&config.colors);

    assert_eq!(cells.len(), table.len() * RoleColumn::ALL.len());
    for cell in &cells {
        let row = &table.rows[cell.row];
        assert_eq!(cell.label, row.label(cell.column));
        assert_eq!(cell.color, config.colors.color_of(cell.label));
    }
}
