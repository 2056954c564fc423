use moo_core::models::{BinaryProgram, Relation};
use std::io::Write;

/// Export a binary program to CPLEX `.lp` format.
///
/// `name` supplies the column name for each variable index; it must produce
/// identifiers the format accepts (letters, digits and `_` are always safe).
pub fn export_lp<F: Fn(usize) -> String>(
    program: &BinaryProgram,
    name: F,
    buffer: &mut impl Write,
) -> Result<(), std::io::Error> {
    writeln!(buffer, "\\ offer selection program")?;
    writeln!(buffer, "Maximize")?;
    write!(buffer, " score:")?;
    write_terms(
        buffer,
        program.objective().iter().copied().enumerate(),
        &name,
    )?;
    writeln!(buffer)?;

    writeln!(buffer, "Subject To")?;
    for (row, constraint) in program.constraints().iter().enumerate() {
        write!(buffer, " c{row}:")?;
        write_terms(buffer, constraint.terms().iter().copied(), &name)?;
        let sense = match constraint.relation() {
            Relation::LessEq => "<=",
            Relation::Eq => "=",
            Relation::GreaterEq => ">=",
        };
        writeln!(buffer, " {sense} {}", constraint.rhs())?;
    }

    // Every variable is binary, which also implies its bounds
    writeln!(buffer, "Binary")?;
    for idx in 0..program.len() {
        writeln!(buffer, " {}", name(idx))?;
    }

    writeln!(buffer, "End")?;
    Ok(())
}

fn write_terms<I: Iterator<Item = (usize, f64)>, F: Fn(usize) -> String>(
    buffer: &mut impl Write,
    terms: I,
    name: &F,
) -> Result<(), std::io::Error> {
    let mut empty = true;
    for (idx, coef) in terms {
        let sign = if coef < 0.0 { '-' } else { '+' };
        write!(buffer, " {sign} {} {}", coef.abs(), name(idx))?;
        empty = false;
    }
    if empty {
        write!(buffer, " 0")?;
    }
    Ok(())
}

/// Export a binary program to fixed `.mps` format.
///
/// MPS is a somewhat archaic format, but is easy enough to generate.
/// https://www.ibm.com/docs/en/icos/22.1.2?topic=standard-records-in-mps-format
/// is a good reference. The objective sense is declared with the common
/// `OBJSENSE` extension, since plain MPS assumes minimization.
pub fn export_mps<F: Fn(usize) -> String>(
    program: &BinaryProgram,
    name: F,
    buffer: &mut impl Write,
) -> Result<(), std::io::Error> {
    writeln!(buffer, "NAME offer_selection")?;
    writeln!(buffer, "OBJSENSE")?;
    writeln!(buffer, "    MAX")?;
    writeln!(buffer, "ROWS")?;
    writeln!(buffer, " N    score")?;
    for (row, constraint) in program.constraints().iter().enumerate() {
        let sense = match constraint.relation() {
            Relation::LessEq => 'L',
            Relation::Eq => 'E',
            Relation::GreaterEq => 'G',
        };
        writeln!(buffer, " {sense}    c{row}")?;
    }

    // MPS is column-major, so we transpose the constraint rows
    let mut columns: Vec<Vec<(usize, f64)>> = vec![Vec::new(); program.len()];
    for (row, constraint) in program.constraints().iter().enumerate() {
        for &(idx, coef) in constraint.terms() {
            columns[idx].push((row, coef));
        }
    }

    writeln!(buffer, "COLUMNS")?;
    writeln!(buffer, "    MARKER    'MARKER'    'INTORG'")?;
    for (idx, (coef, column)) in program.objective().iter().zip(columns.iter()).enumerate() {
        let column_name = name(idx);
        writeln!(buffer, "    {column_name}    score    {coef}")?;
        for (row, weight) in column.iter() {
            writeln!(buffer, "    {column_name}    c{row}    {weight}")?;
        }
    }
    writeln!(buffer, "    MARKER    'MARKER'    'INTEND'")?;

    writeln!(buffer, "RHS")?;
    for (row, constraint) in program.constraints().iter().enumerate() {
        writeln!(buffer, "    RHS    c{row}    {}", constraint.rhs())?;
    }

    writeln!(buffer, "BOUNDS")?;
    for idx in 0..program.len() {
        writeln!(buffer, " BV BND    {}", name(idx))?;
    }

    writeln!(buffer, "ENDATA")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use moo_core::models::Constraint;

    fn program() -> BinaryProgram {
        let mut program = BinaryProgram::new(vec![0.8, -0.25]).unwrap();
        program
            .add_constraint(Constraint::leq([(0, 500.0), (1, 100.0)], 600.0))
            .unwrap();
        program
            .add_constraint(Constraint::eq([(0, 1.0), (1, 1.0)], 1.0))
            .unwrap();
        program
            .add_constraint(Constraint::geq([(0, 0.8)], 0.5))
            .unwrap();
        program
    }

    #[test]
    fn test_lp() {
        let mut buffer = Vec::new();
        export_lp(&program(), |idx| format!("x{idx}"), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains(" score: + 0.8 x0 - 0.25 x1\n"));
        assert!(text.contains(" c0: + 500 x0 + 100 x1 <= 600\n"));
        assert!(text.contains(" c1: + 1 x0 + 1 x1 = 1\n"));
        assert!(text.contains(" c2: + 0.8 x0 >= 0.5\n"));
        assert!(text.ends_with("Binary\n x0\n x1\nEnd\n"));
    }

    #[test]
    fn test_mps() {
        let mut buffer = Vec::new();
        export_mps(&program(), |idx| format!("x{idx}"), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains(" L    c0\n E    c1\n G    c2\n"));
        assert!(text.contains("    x1    score    -0.25\n    x1    c0    100\n    x1    c1    1\n"));
        assert!(text.contains("    RHS    c0    600\n"));
        assert!(text.contains(" BV BND    x0\n"));
        assert!(text.ends_with("ENDATA\n"));
    }
}
