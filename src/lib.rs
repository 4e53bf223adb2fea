pub mod configuration;

pub mod hydraulics {
    pub mod accumulator;
    pub mod hydraulicserror;
    pub mod pumpcurve;
    pub mod pumpgroup;
    pub mod systemcurve;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod sampledcurve;
    }

    pub mod intersection {
        pub mod intersectionfinder;
    }
}

pub mod plot {
    pub mod annotationfilter;
    pub mod chartwriter;
    pub mod ploterror;
    pub mod scenariochart;
}

pub mod scrape {
    pub mod htmlarchive;
    pub mod htmlutility;
    pub mod jsonstore;
    pub mod productscraper;
}

pub mod sweep {
    pub mod scenario;
    pub mod sweeperror;
    pub mod sweepreport;
    pub mod sweeprunner;
}
