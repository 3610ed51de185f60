pub struct RegionCode {
}

impl RegionCode {
    /// Region reported for a valid number whose country cannot be resolved,
    /// e.g. numbers of non-geographic entities such as +800.
    pub fn get_unknown() -> &'static str {
        return Self::zz();
    }

    pub fn zz() -> &'static str {
        return "ZZ";
    }
}
