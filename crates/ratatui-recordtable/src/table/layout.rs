//! Vertical space allocation: scroll inside a fixed container, or shrink to the rows.
//!
//! Units are terminal rows. The arithmetic is unsigned: a header and footer taller than the
//! container leave a rows region of zero.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutInput {
    pub container_height: u32,
    pub header_height: u32,
    pub footer_height: u32,
    pub row_height: u32,
    pub visible_row_count: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutAllocation {
    pub rows_region_height: u32,
    pub total_height: u32,
    pub should_scroll: bool,
}

/// Decides the rows region height and the component height.
///
/// Few rows shrink the component to `header + rows + footer`; once the rows need more than the
/// space left under the header and above the footer, the component takes the full container
/// height and the rows region scrolls.
pub fn allocate(input: LayoutInput) -> LayoutAllocation {
    let base_region = input
        .container_height
        .saturating_sub(input.header_height)
        .saturating_sub(input.footer_height);
    let content_height = (input.visible_row_count as u64).saturating_mul(input.row_height as u64);
    let should_scroll = content_height > base_region as u64;

    let rows_region_height = if should_scroll {
        base_region
    } else {
        content_height.min(base_region as u64) as u32
    };
    let total_height = if should_scroll {
        input.container_height
    } else {
        input.header_height + rows_region_height + input.footer_height
    };

    LayoutAllocation {
        rows_region_height,
        total_height,
        should_scroll,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(container: u32, rows: usize) -> LayoutInput {
        LayoutInput {
            container_height: container,
            header_height: 1,
            footer_height: 1,
            row_height: 1,
            visible_row_count: rows,
        }
    }

    #[test]
    fn few_rows_shrink_to_fit() {
        let out = allocate(input(20, 3));
        assert_eq!(
            out,
            LayoutAllocation {
                rows_region_height: 3,
                total_height: 5,
                should_scroll: false,
            }
        );
    }

    #[test]
    fn exact_fit_does_not_scroll() {
        let out = allocate(input(10, 8));
        assert!(!out.should_scroll);
        assert_eq!(out.total_height, 10);
    }

    #[test]
    fn many_rows_scroll_inside_container() {
        let out = allocate(input(10, 9));
        assert!(out.should_scroll);
        assert_eq!(out.rows_region_height, 8);
        assert_eq!(out.total_height, 10);
    }

    #[test]
    fn zero_rows_is_header_plus_footer() {
        let out = allocate(input(10, 0));
        assert_eq!(out.rows_region_height, 0);
        assert_eq!(out.total_height, 2);
    }

    #[test]
    fn chrome_taller_than_container_saturates() {
        let out = allocate(LayoutInput {
            container_height: 1,
            header_height: 2,
            footer_height: 2,
            row_height: 1,
            visible_row_count: 1,
        });
        assert!(out.should_scroll);
        assert_eq!(out.rows_region_height, 0);
        assert_eq!(out.total_height, 1);
    }

    #[test]
    fn allocation_is_pure_and_matches_scroll_rule() {
        for container in [0u32, 3, 7, 40] {
            for rows in [0usize, 1, 5, 38, 100] {
                for row_height in [1u32, 2] {
                    let i = LayoutInput {
                        container_height: container,
                        header_height: 1,
                        footer_height: 2,
                        row_height,
                        visible_row_count: rows,
                    };
                    let a = allocate(i);
                    assert_eq!(a, allocate(i));
                    let base = container.saturating_sub(3) as u64;
                    assert_eq!(a.should_scroll, rows as u64 * row_height as u64 > base);
                }
            }
        }
    }
}
