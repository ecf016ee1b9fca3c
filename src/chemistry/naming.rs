//! Conway's names for the 92 common elements and the transuranic families

/// The common elements in order of atomic number (Hydrogen is `22`)
const COMMON_ELEMENTS: [(&str, &str); 92] = [
    ("22", "H"),
    ("13112221133211322112211213322112", "He"),
    ("312211322212221121123222112", "Li"),
    ("111312211312113221133211322112211213322112", "Be"),
    ("1321132122211322212221121123222112", "B"),
    ("3113112211322112211213322112", "C"),
    ("111312212221121123222112", "N"),
    ("132112211213322112", "O"),
    ("31121123222112", "F"),
    ("111213322112", "Ne"),
    ("123222112", "Na"),
    ("3113322112", "Mg"),
    ("1113222112", "Al"),
    ("1322112", "Si"),
    ("311311222112", "P"),
    ("1113122112", "S"),
    ("132112", "Cl"),
    ("3112", "Ar"),
    ("1112", "K"),
    ("12", "Ca"),
    ("3113112221133112", "Sc"),
    ("11131221131112", "Ti"),
    ("13211312", "V"),
    ("31132", "Cr"),
    ("111311222112", "Mn"),
    ("13122112", "Fe"),
    ("32112", "Co"),
    ("11133112", "Ni"),
    ("131112", "Cu"),
    ("312", "Zn"),
    ("13221133122211332", "Ga"),
    ("31131122211311122113222", "Ge"),
    ("11131221131211322113322112", "As"),
    ("13211321222113222112", "Se"),
    ("3113112211322112", "Br"),
    ("11131221222112", "Kr"),
    ("1321122112", "Rb"),
    ("3112112", "Sr"),
    ("1112133", "Y"),
    ("12322211331222113112211", "Zr"),
    ("1113122113322113111221131221", "Nb"),
    ("13211322211312113211", "Mo"),
    ("311322113212221", "Tc"),
    ("132211331222113112211", "Ru"),
    ("311311222113111221131221", "Rh"),
    ("111312211312113211", "Pd"),
    ("132113212221", "Ag"),
    ("3113112211", "Cd"),
    ("11131221", "In"),
    ("13211", "Sn"),
    ("3112221", "Sb"),
    ("1322113312211", "Te"),
    ("311311222113111221", "I"),
    ("11131221131211", "Xe"),
    ("13211321", "Cs"),
    ("311311", "Ba"),
    ("11131", "La"),
    ("1321133112", "Ce"),
    ("31131112", "Pr"),
    ("111312", "Nd"),
    ("132", "Pm"),
    ("311332", "Sm"),
    ("1113222", "Eu"),
    ("13221133112", "Gd"),
    ("3113112221131112", "Tb"),
    ("111312211312", "Dy"),
    ("1321132", "Ho"),
    ("311311222", "Er"),
    ("11131221133112", "Tm"),
    ("1321131112", "Yb"),
    ("311312", "Lu"),
    ("11132", "Hf"),
    ("13112221133211322112211213322113", "Ta"),
    ("312211322212221121123222113", "W"),
    ("111312211312113221133211322112211213322113", "Re"),
    ("1321132122211322212221121123222113", "Os"),
    ("3113112211322112211213322113", "Ir"),
    ("111312212221121123222113", "Pt"),
    ("132112211213322113", "Au"),
    ("31121123222113", "Hg"),
    ("111213322113", "Tl"),
    ("123222113", "Pb"),
    ("3113322113", "Bi"),
    ("1113222113", "Po"),
    ("1322113", "At"),
    ("311311222113", "Rn"),
    ("1113122113", "Fr"),
    ("132113", "Ra"),
    ("3113", "Ac"),
    ("1113", "Th"),
    ("13", "Pa"),
    ("3", "U"),
];

/// Plutonium and Neptunium strings end in an arbitrary digit `n >= 4`
const TRANSURANIC_FAMILIES: [(&str, &str); 2] = [
    ("31221132221222112112322211", "Pu"),
    ("1311222113321132211221121332211", "Np"),
];

fn common_entry(string: &str) -> Option<(usize, &'static str)> {
    COMMON_ELEMENTS
        .iter()
        .position(|(s, _)| *s == string)
        .map(|i| (i + 1, COMMON_ELEMENTS[i].1))
}

/// Conway's name for `string`, `None` outside the table
pub(crate) fn conway_name(string: &str) -> Option<String> {
    if let Some((_, name)) = common_entry(string) {
        return Some(name.to_string());
    }
    let last = string.chars().next_back()?;
    TRANSURANIC_FAMILIES.iter().find_map(|(prefix, name)| {
        let body = &string[..string.len() - last.len_utf8()];
        (body == *prefix).then(|| format!("{name}{last}"))
    })
}

/// Atomic number of a common element; anything else sorts after Uranium by
/// length and trailing character
pub(crate) fn conway_number(string: &str) -> u64 {
    match common_entry(string) {
        Some((number, _)) => number as u64,
        None => {
            let trailing = string.chars().next_back().map_or(0, u64::from);
            92 * string.chars().count() as u64 + trailing
        }
    }
}
