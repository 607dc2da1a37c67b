//! Built-in catalog data. Extending the catalog is a change to this file
//! (or to `tag_extraction` in the settings), never to the matching code.

use super::catalog::TagCategory;

pub struct GroupData {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

pub const TECH_KEYWORDS: &[&str] = &[
    // ── Languages ──
    "python", "java", "javascript", "typescript", "c#", "c++", "c", "ruby", "go", "golang",
    "php", "swift", "kotlin", "rust", "scala", "perl", "r", "matlab", "objective-c", "dart",
    "lua", "julia", "groovy", "assembly", "fortran", "haskell", "powershell", "bash", "shell",
    "solidity", "clojure", "lisp", "elixir", "erlang",
    // ── Frontend ──
    "html", "css", "sass", "less", "react", "angular", "vue", "svelte", "jquery", "bootstrap",
    "tailwind", "material-ui", "redux", "ember", "gatsby", "next.js", "nuxt", "webpack", "babel",
    "vite", "storybook", "styled-components", "css-in-js", "webgl", "three.js", "d3", "chart.js",
    "canvas", "svg", "pwa", "web components", "electron", "ionic", "capacitor", "cordova",
    "flutter",
    // ── Backend ──
    "node", "nodejs", "express", "nestjs", "spring", "django", "flask", "laravel", "rails",
    "asp.net", ".net", "servlet", "fastapi", "graphql", "rest", "soap", "grpc", "api",
    "microservices", "serverless", "lambda", "azure functions", "symfony", "codeigniter", "zend",
    "play framework", "akka", "gin", "echo",
    // ── Databases ──
    "sql", "mysql", "postgresql", "oracle", "sql server", "sqlserver", "sqlite", "db2", "mongo",
    "mongodb", "dynamodb", "cassandra", "redis", "couchdb", "firestore", "bigtable", "influxdb",
    "neo4j", "graph database", "time series", "database", "mariadb", "hbase", "cockroachdb",
    "elasticsearch", "solr", "lucene",
    // ── Cloud & DevOps ──
    "aws", "azure", "gcp", "google cloud", "docker", "kubernetes", "k8s", "jenkins", "gitlab-ci",
    "github actions", "terraform", "ansible", "puppet", "chef", "vagrant", "prometheus",
    "grafana", "datadog", "elk", "cloudformation", "pulumi", "openshift", "istio", "envoy",
    "consul", "vault", "helm", "argo", "tekton", "digitalocean", "heroku", "netlify", "vercel",
    "cloudflare", "akamai", "fastly", "openstack",
    // ── Mobile ──
    "android", "ios", "react native", "xamarin", "android studio", "xcode", "cocoapods",
    "firebase", "realm",
    // ── Version control ──
    "git", "github", "gitlab", "bitbucket", "svn", "mercurial", "perforce",
    // ── Testing ──
    "selenium", "cypress", "playwright", "jest", "mocha", "jasmine", "junit", "pytest", "testng",
    "cucumber", "appium", "postman", "soapui", "loadrunner", "jmeter", "gatling", "locust",
    "karma", "enzyme", "rtl", "testing-library",
    // ── Data & AI ──
    "hadoop", "spark", "kafka", "airflow", "tableau", "power bi", "looker", "data studio", "qlik",
    "tensorflow", "pytorch", "keras", "scikit-learn", "opencv", "pandas", "numpy", "scipy",
    "matplotlib", "seaborn", "plotly", "dask", "pyspark", "jupyter", "databricks", "sagemaker",
    "hugging face", "langchain", "llama", "spacy", "nltk", "gensim",
    // ── Security ──
    "burp suite", "metasploit", "wireshark", "nmap", "kali linux", "snort", "splunk", "openvas",
    "owasp zap", "nessus", "palo alto", "fortinet", "checkpoint", "crowdstrike", "carbon black",
    "cyberark", "okta", "auth0", "keycloak", "hashicorp vault",
    // ── Operating systems ──
    "linux", "windows", "macos", "unix", "freebsd", "openbsd", "ubuntu", "debian", "centos",
    "rhel", "fedora", "alpine", "arch linux", "raspbian", "windows server", "active directory",
    "vmware", "virtualbox", "hyper-v",
    // ── UX/UI ──
    "figma", "sketch", "adobe xd", "invision", "zeplin", "framer", "principle", "protopie",
    "balsamiq", "axure", "miro", "user research", "usability testing", "wireframing",
    "prototyping", "design system", "accessibility", "wcag", "a11y", "interaction design",
    "visual design", "user-centered design", "information architecture", "photoshop",
    "illustrator", "indesign", "after effects", "premiere pro",
    // ── Emerging ──
    "ethereum", "web3.js", "truffle", "hardhat", "ganache", "metamask", "iot", "arduino",
    "raspberry pi", "mqtt", "zigbee", "lorawan", "bluetooth le", "ar kit", "ar core", "unity",
    "unreal engine", "babylon.js", "vuforia", "oculus", "hololens", "tensorflow lite",
    "edge impulse", "ros", "drone kit",
    // ── Developer tools ──
    "visual studio code", "intellij", "pycharm", "webstorm", "eclipse", "netbeans", "vim",
    "emacs", "sublime text", "atom", "jira", "confluence", "slack", "teams", "notion",
    "obsidian", "docker desktop", "kubernetes dashboard", "lens", "pgadmin", "dbeaver",
    "mongodb compass", "robo 3t", "redis desktop manager", "insomnia", "swagger", "openapi",
    "charles proxy", "fiddler",
    // ── Roles and local market ──
    "fullstack", "frontend", "backend", "sence", "corfo", "startup chile", "fintech",
    "insurtech", "proptech", "edtech", "healthtech", "remote work", "híbrido",
];

pub const TAG_VARIATIONS: &[(&str, &[&str])] = &[
    ("javascript", &["js", "javascript", "ecmascript"]),
    ("typescript", &["ts", "typescript"]),
    ("python", &["python", "py"]),
    ("java", &["java"]),
    ("c#", &["c#", "csharp", "c sharp"]),
    ("c++", &["c++", "cpp", "cplusplus"]),
    ("go", &["golang"]),
    ("nodejs", &["node", "nodejs", "node.js"]),
    ("react", &["react", "reactjs", "react.js"]),
    ("angular", &["angular", "angularjs"]),
    ("vue", &["vue", "vuejs", "vue.js"]),
    ("next.js", &["next", "next.js", "nextjs"]),
    ("sql server", &["sql server", "sqlserver", "mssql"]),
    ("mongodb", &["mongo", "mongodb"]),
    ("postgresql", &["postgres", "postgresql"]),
    ("kubernetes", &["k8s", "kubernetes"]),
    ("github actions", &["github actions", "github-actions"]),
    ("google cloud", &["gcp", "google cloud", "google cloud platform"]),
    ("react native", &["react native", "react-native"]),
    ("rails", &["ruby on rails"]),
    ("elasticsearch", &["elastic search"]),
    ("aws", &["amazon web services"]),
    ("power bi", &["powerbi"]),
    ("scikit-learn", &["sklearn"]),
    ("machine learning", &["ml", "machine learning", "aprendizaje automático"]),
    ("artificial intelligence", &["ai", "artificial intelligence", "inteligencia artificial"]),
    ("data science", &["data science", "ciencia de datos"]),
    ("user experience", &["ux", "user experience"]),
    ("user interface", &["ui", "user interface"]),
    ("fullstack", &["fullstack", "full-stack", "full stack"]),
    ("frontend", &["frontend", "front-end", "front end"]),
    ("backend", &["backend", "back-end", "back end"]),
    ("product manager", &["product manager"]),
    ("product owner", &["product owner"]),
    ("remote work", &["remote work", "trabajo remoto"]),
];

pub const TAG_GROUPS: &[GroupData] = &[
    GroupData {
        key: "cloud-platforms",
        name: "cloud platforms",
        description: "Cloud computing platforms",
        tags: &["aws", "azure", "google cloud", "digitalocean", "heroku"],
    },
    GroupData {
        key: "frontend-frameworks",
        name: "frontend frameworks",
        description: "Frameworks for frontend development",
        tags: &["react", "angular", "vue", "svelte", "ember"],
    },
    GroupData {
        key: "backend-frameworks",
        name: "backend frameworks",
        description: "Frameworks for backend development",
        tags: &["express", "django", "flask", "spring", "laravel", "rails"],
    },
    GroupData {
        key: "databases-sql",
        name: "sql databases",
        description: "Relational databases",
        tags: &["mysql", "postgresql", "sql server", "oracle", "sqlite"],
    },
    GroupData {
        key: "databases-nosql",
        name: "nosql databases",
        description: "Non-relational databases",
        tags: &["mongodb", "redis", "cassandra", "dynamodb", "elasticsearch"],
    },
    GroupData {
        key: "containerization",
        name: "containerization",
        description: "Container technologies",
        tags: &["docker", "kubernetes", "openshift", "helm"],
    },
    GroupData {
        key: "mobile-development",
        name: "mobile development",
        description: "Mobile development",
        tags: &["react native", "flutter", "ionic", "xamarin", "android", "ios"],
    },
    GroupData {
        key: "data-science",
        name: "data science",
        description: "Data science and machine learning",
        tags: &["python", "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch"],
    },
    GroupData {
        key: "testing-tools",
        name: "testing tools",
        description: "Testing tools",
        tags: &["jest", "selenium", "cypress", "junit", "pytest", "mocha"],
    },
    GroupData {
        key: "ci-cd",
        name: "ci/cd",
        description: "Continuous integration and delivery",
        tags: &["jenkins", "github actions", "gitlab-ci", "argo", "tekton"],
    },
    GroupData {
        key: "infrastructure-as-code",
        name: "infrastructure as code",
        description: "Provisioning and configuration management",
        tags: &["terraform", "ansible", "pulumi", "cloudformation", "puppet", "chef"],
    },
];

pub const TAG_CATEGORIES: &[(TagCategory, &[&str])] = &[
    (
        TagCategory::Languages,
        &[
            "python", "javascript", "typescript", "java", "c#", "c++", "go", "rust", "php", "ruby",
            "kotlin", "swift", "scala", "dart", "elixir", "perl", "r", "matlab", "haskell",
            "clojure", "lua", "bash", "powershell", "sql",
        ],
    ),
    (
        TagCategory::Frameworks,
        &[
            "react", "angular", "vue", "svelte", "ember", "next.js", "nuxt", "django", "flask",
            "fastapi", "spring", "express", "nestjs", "laravel", "rails", "symfony", "asp.net",
            ".net", "flutter", "react native", "jquery", "redux", "bootstrap", "tailwind",
            "nodejs",
        ],
    ),
    (
        TagCategory::Databases,
        &[
            "mysql", "postgresql", "mongodb", "redis", "sqlite", "oracle", "sql server", "mariadb",
            "cassandra", "elasticsearch", "dynamodb", "firestore", "neo4j", "couchdb",
        ],
    ),
    (
        TagCategory::Cloud,
        &[
            "aws", "azure", "google cloud", "docker", "kubernetes", "terraform", "ansible",
            "openshift", "helm", "heroku", "digitalocean", "cloudformation", "pulumi", "vercel",
            "netlify", "cloudflare", "firebase",
        ],
    ),
    (
        TagCategory::Tools,
        &[
            "git", "github", "gitlab", "bitbucket", "jenkins", "github actions", "gitlab-ci",
            "webpack", "babel", "eslint", "vite", "jira", "confluence", "figma", "postman", "jest",
            "selenium", "cypress", "pytest", "junit", "mocha", "grafana", "prometheus", "datadog",
        ],
    ),
    (
        TagCategory::Concepts,
        &[
            "machine learning", "artificial intelligence", "data science", "microservices", "api",
            "rest", "graphql", "grpc", "serverless", "fullstack", "frontend", "backend",
            "user experience", "user interface", "accessibility", "design system",
        ],
    ),
];
