//! Static string tables for the two UI locales. Both locales carry an
//! identical key tree; the shared struct type enforces that shape.

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    pub meta: MetaText,
    pub nav: NavText,
    pub hero: HeroText,
    pub about: AboutText,
    pub skills: SkillsText,
    pub works: WorksText,
    pub projects: ProjectsText,
    pub tech_stack: TechStackText,
    pub contact: ContactText,
    pub footer: FooterText,
    pub common: CommonText,
    pub admin: AdminText,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaText {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavText {
    pub home: &'static str,
    pub about: &'static str,
    pub projects: &'static str,
    pub skills: &'static str,
    pub works: &'static str,
    pub contact: &'static str,
    pub admin: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroText {
    pub greeting: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cta: &'static str,
    pub contact: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static [&'static str],
    pub experience: &'static str,
    pub projects: &'static str,
    pub clients: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub categories: SkillCategoriesText,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategoriesText {
    pub mobile: &'static str,
    pub backend: &'static str,
    pub database: &'static str,
    pub devops: &'static str,
    pub tools: &'static str,
    pub design: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub current: &'static str,
    pub present: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub view_all: &'static str,
    pub view_project: &'static str,
    pub view_code: &'static str,
    pub live_demo: &'static str,
    pub featured: &'static str,
    pub technologies: &'static str,
    pub not_found: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStackText {
    pub title: &'static str,
    pub subtitle: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactText {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub form: ContactFormText,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormText {
    pub name: &'static str,
    pub name_placeholder: &'static str,
    pub email: &'static str,
    pub email_placeholder: &'static str,
    pub subject: &'static str,
    pub subject_placeholder: &'static str,
    pub message: &'static str,
    pub message_placeholder: &'static str,
    pub send: &'static str,
    pub sending: &'static str,
    pub success: &'static str,
    pub error: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterText {
    pub rights: &'static str,
    pub made_with: &'static str,
    pub by: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonText {
    pub loading: &'static str,
    pub error: &'static str,
    pub retry: &'static str,
    pub back: &'static str,
    pub next: &'static str,
    pub previous: &'static str,
    pub close: &'static str,
    pub open: &'static str,
    pub search: &'static str,
    pub no_results: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminText {
    pub dashboard: &'static str,
    pub login: &'static str,
    pub logout: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub login_button: &'static str,
    pub welcome_back: &'static str,
    pub sidebar: AdminSidebarText,
    pub projects_crud: ProjectsCrudText,
    pub works_crud: WorksCrudText,
    pub messages_crud: MessagesCrudText,
    pub stats: AdminStatsText,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSidebarText {
    pub overview: &'static str,
    pub projects: &'static str,
    pub works: &'static str,
    pub messages: &'static str,
    pub settings: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsCrudText {
    pub title: &'static str,
    pub add: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
    pub delete_confirm: &'static str,
    pub no_projects: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksCrudText {
    pub title: &'static str,
    pub add: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
    pub delete_confirm: &'static str,
    pub no_works: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesCrudText {
    pub title: &'static str,
    pub mark_as_read: &'static str,
    pub archive: &'static str,
    pub delete: &'static str,
    pub delete_confirm: &'static str,
    pub no_messages: &'static str,
    pub status: MessageStatusText,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStatusText {
    pub new: &'static str,
    pub read: &'static str,
    pub archived: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsText {
    pub total_projects: &'static str,
    pub total_works: &'static str,
    pub new_messages: &'static str,
    pub total_views: &'static str,
}

pub static EN: Dictionary = Dictionary {
    meta: MetaText {
        title: "Alhussein Abdalsabour | Mobile App Developer",
        description: "Professional mobile app developer specializing in Flutter, Kotlin, and cross-platform development",
    },
    nav: NavText {
        home: "Home",
        about: "About",
        projects: "Projects",
        skills: "Skills",
        works: "Experience",
        contact: "Contact",
        admin: "Dashboard",
    },
    hero: HeroText {
        greeting: "Hello, I'm",
        name: "Alhussein Abdalsabour",
        title: "Mobile App Developer",
        subtitle: "I build high-quality mobile apps using Flutter, Kotlin, and cutting-edge technologies",
        cta: "View My Work",
        contact: "Contact Me",
    },
    about: AboutText {
        title: "About Me",
        subtitle: "Get to know me",
        description: &[
            "Hello! I'm Alhussein, a passionate Flutter developer with a strong foundation in building cross-platform mobile applications.",
            "I specialize in creating beautiful, responsive, and performant mobile apps using Flutter and Dart. My experience spans across various domains including e-commerce, social media, education, and productivity applications.",
            "I'm constantly learning and staying up-to-date with the latest technologies and best practices in mobile development. I believe in writing clean, maintainable code and creating exceptional user experiences.",
            "When I'm not coding, you'll find me exploring new technologies, contributing to open-source projects, or sharing my knowledge with the developer community.",
        ],
        experience: "Years Experience",
        projects: "Completed Projects",
        clients: "Happy Clients",
    },
    skills: SkillsText {
        title: "Skills",
        subtitle: "Technologies I master",
        categories: SkillCategoriesText {
            mobile: "Mobile Development",
            backend: "Backend",
            database: "Databases",
            devops: "DevOps",
            tools: "Tools",
            design: "Design",
        },
    },
    works: WorksText {
        title: "Work Experience",
        subtitle: "My professional journey",
        current: "Current",
        present: "Present",
        to: "→",
    },
    projects: ProjectsText {
        title: "Projects",
        subtitle: "My featured work",
        view_all: "View All Projects",
        view_project: "View Project",
        view_code: "View Code",
        live_demo: "Live Demo",
        featured: "Featured",
        technologies: "Technologies Used",
        not_found: "Project not found",
    },
    tech_stack: TechStackText {
        title: "Tech Stack",
        subtitle: "Tools & technologies I use",
    },
    contact: ContactText {
        title: "Contact Me",
        subtitle: "Let's work together",
        description: "Have a project in mind? Reach out and I would be happy to help!",
        form: ContactFormText {
            name: "Name",
            name_placeholder: "Enter your name",
            email: "Email",
            email_placeholder: "Enter your email",
            subject: "Subject",
            subject_placeholder: "What is your message about?",
            message: "Message",
            message_placeholder: "Write your message here...",
            send: "Send Message",
            sending: "Sending...",
            success: "Your message has been sent successfully!",
            error: "An error occurred, please try again.",
        },
    },
    footer: FooterText {
        rights: "All rights reserved",
        made_with: "Made with",
        by: "by",
    },
    common: CommonText {
        loading: "Loading...",
        error: "An error occurred",
        retry: "Retry",
        back: "Back",
        next: "Next",
        previous: "Previous",
        close: "Close",
        open: "Open",
        search: "Search",
        no_results: "No results found",
    },
    admin: AdminText {
        dashboard: "Dashboard",
        login: "Login",
        logout: "Logout",
        email: "Email",
        password: "Password",
        login_button: "Sign In",
        welcome_back: "Welcome back",
        sidebar: AdminSidebarText {
            overview: "Overview",
            projects: "Projects",
            works: "Works",
            messages: "Messages",
            settings: "Settings",
        },
        projects_crud: ProjectsCrudText {
            title: "Manage Projects",
            add: "Add Project",
            edit: "Edit Project",
            delete: "Delete Project",
            delete_confirm: "Are you sure you want to delete this project?",
            no_projects: "No projects yet",
        },
        works_crud: WorksCrudText {
            title: "Manage Works",
            add: "Add Work",
            edit: "Edit Work",
            delete: "Delete Work",
            delete_confirm: "Are you sure you want to delete this work?",
            no_works: "No works yet",
        },
        messages_crud: MessagesCrudText {
            title: "Messages Inbox",
            mark_as_read: "Mark as Read",
            archive: "Archive",
            delete: "Delete",
            delete_confirm: "Are you sure you want to delete this message?",
            no_messages: "No new messages",
            status: MessageStatusText {
                new: "New",
                read: "Read",
                archived: "Archived",
            },
        },
        stats: AdminStatsText {
            total_projects: "Total Projects",
            total_works: "Total Works",
            new_messages: "New Messages",
            total_views: "Total Views",
        },
    },
};

pub static AR: Dictionary = Dictionary {
    meta: MetaText {
        title: "الحسين عبدالصبور | مطور تطبيقات الموبايل",
        description: "مطور تطبيقات موبايل محترف متخصص في Flutter و Kotlin و تطوير التطبيقات المتعددة المنصات",
    },
    nav: NavText {
        home: "الرئيسية",
        about: "عني",
        projects: "المشاريع",
        skills: "المهارات",
        works: "الخبرات",
        contact: "تواصل معي",
        admin: "لوحة التحكم",
    },
    hero: HeroText {
        greeting: "مرحباً، أنا",
        name: "الحسين عبدالصبور",
        title: "مطور تطبيقات الموبايل",
        subtitle: "أبني تطبيقات موبايل عالية الجودة باستخدام Flutter و Kotlin وأحدث التقنيات",
        cta: "تصفح مشاريعي",
        contact: "تواصل معي",
    },
    about: AboutText {
        title: "عني",
        subtitle: "تعرف علي أكثر",
        description: &[
            "أنا الحسين، مطور Flutter بحب أبني تطبيقات موبايل سريعة، أنيقة، وسهلة الاستخدام، وتشتغل بكفاءة على أندرويد و iOS من كود واحد.",
            "اشتغلت على تطبيقات في مجالات مختلفة زي التجارة الإلكترونية، التعليم، السوشيال ميديا، وتطبيقات الإنتاجية، ودايمًا تركيزي بيكون على الأداء، التجربة، ونظافة الكود.",
            "مهتم بالتعلم المستمر ومتابعة كل جديد في Flutter و Dart، وبحب أطبق أفضل الممارسات بدل ما أكتب كود وخلاص. بالنسبة لي، تجربة المستخدم مش إضافة… دي الأساس.",
            "بعيدًا عن الشغل، بستكشف تقنيات جديدة، أشارك في مشاريع مفتوحة المصدر، وبحب أشارك اللي اتعلمته مع مجتمع المطورين.",
        ],
        experience: "سنوات الخبرة",
        projects: "المشاريع المكتملة",
        clients: "العملاء",
    },
    skills: SkillsText {
        title: "المهارات",
        subtitle: "التقنيات التي أتقنها",
        categories: SkillCategoriesText {
            mobile: "تطوير الموبايل",
            backend: "الخلفية",
            database: "قواعد البيانات",
            devops: "DevOps",
            tools: "الأدوات",
            design: "التصميم",
        },
    },
    works: WorksText {
        title: "الخبرات العملية",
        subtitle: "مسيرتي المهنية",
        current: "حالياً",
        present: "الآن",
        to: "←",
    },
    projects: ProjectsText {
        title: "المشاريع",
        subtitle: "أعمالي المميزة",
        view_all: "عرض جميع المشاريع",
        view_project: "عرض المشروع",
        view_code: "عرض الكود",
        live_demo: "تصفح التطبيق",
        featured: "مميز",
        technologies: "التقنيات المستخدمة",
        not_found: "المشروع غير موجود",
    },
    tech_stack: TechStackText {
        title: "التقنيات",
        subtitle: "الأدوات والتقنيات التي أستخدمها",
    },
    contact: ContactText {
        title: "تواصل معي",
        subtitle: "دعنا نعمل معاً",
        description: "هل لديك مشروع في ذهنك؟ تواصل معي وسأكون سعيداً بمساعدتك!",
        form: ContactFormText {
            name: "الاسم",
            name_placeholder: "أدخل اسمك",
            email: "البريد الإلكتروني",
            email_placeholder: "أدخل بريدك الإلكتروني",
            subject: "الموضوع",
            subject_placeholder: "ما موضوع رسالتك؟",
            message: "الرسالة",
            message_placeholder: "اكتب رسالتك هنا...",
            send: "إرسال الرسالة",
            sending: "جاري الإرسال...",
            success: "تم إرسال رسالتك بنجاح!",
            error: "حدث خطأ، يرجى المحاولة مرة أخرى.",
        },
    },
    footer: FooterText {
        rights: "جميع الحقوق محفوظة",
        made_with: "صنع",
        by: "بواسطة",
    },
    common: CommonText {
        loading: "جاري التحميل...",
        error: "حدث خطأ",
        retry: "إعادة المحاولة",
        back: "رجوع",
        next: "التالي",
        previous: "السابق",
        close: "إغلاق",
        open: "فتح",
        search: "بحث",
        no_results: "لا توجد نتائج",
    },
    admin: AdminText {
        dashboard: "لوحة التحكم",
        login: "تسجيل الدخول",
        logout: "تسجيل الخروج",
        email: "البريد الإلكتروني",
        password: "كلمة المرور",
        login_button: "دخول",
        welcome_back: "مرحباً بعودتك",
        sidebar: AdminSidebarText {
            overview: "نظرة عامة",
            projects: "المشاريع",
            works: "الأعمال",
            messages: "الرسائل",
            settings: "الإعدادات",
        },
        projects_crud: ProjectsCrudText {
            title: "إدارة المشاريع",
            add: "إضافة مشروع",
            edit: "تعديل المشروع",
            delete: "حذف المشروع",
            delete_confirm: "هل أنت متأكد من حذف هذا المشروع؟",
            no_projects: "لا توجد مشاريع بعد",
        },
        works_crud: WorksCrudText {
            title: "إدارة الأعمال",
            add: "إضافة عمل",
            edit: "تعديل العمل",
            delete: "حذف العمل",
            delete_confirm: "هل أنت متأكد من حذف هذا العمل؟",
            no_works: "لا توجد أعمال بعد",
        },
        messages_crud: MessagesCrudText {
            title: "صندوق الرسائل",
            mark_as_read: "تحديد كمقروء",
            archive: "أرشفة",
            delete: "حذف",
            delete_confirm: "هل أنت متأكد من حذف هذه الرسالة؟",
            no_messages: "لا توجد رسائل جديدة",
            status: MessageStatusText {
                new: "جديد",
                read: "مقروء",
                archived: "مؤرشف",
            },
        },
        stats: AdminStatsText {
            total_projects: "إجمالي المشاريع",
            total_works: "إجمالي الأعمال",
            new_messages: "رسائل جديدة",
            total_views: "إجمالي المشاهدات",
        },
    },
};
